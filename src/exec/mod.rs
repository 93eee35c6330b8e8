// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs the external capture tool under a hard wall-clock deadline, using
//! `tokio::process::Command`.
//!
//! - [`runner`] defines the `ProcessRunner` trait and the production
//!   `RealProcessRunner`. Tests substitute a fake implementation that
//!   never spawns real processes (see `dualcam-test-utils`).

pub mod runner;

pub use runner::{CaptureOutcome, CommandSpec, ProcessRunner, RealProcessRunner};
