// src/capture/mod.rs

//! Acquisition core: command construction, artifact validation, status
//! logging, and the per-cycle controller.
//!
//! - [`command`] builds raspistill/raspivid argument lists.
//! - [`validate`] checks the produced artifact for existence and size.
//! - [`status`] owns the append-only status log format.
//! - [`controller`] ties one decide→capture→validate→log cycle together.

use std::path::{Path, PathBuf};

use crate::types::CaptureMode;

pub mod command;
pub mod controller;
pub mod status;
pub mod validate;

pub use controller::{AcquisitionController, AcquisitionSession, CycleReport};
pub use status::{StatusRecord, StatusRecorder};
pub use validate::{OutputValidator, ValidationOutcome};

/// Expected location of the artifact for `(mode, reference_timestamp)`.
///
/// Each mode writes into its own namespace under `output_dir`, keyed by the
/// timestamp at integer-second granularity:
/// `images/<ts>.jpg` for stills, `videos/<ts>.h264` for clips.
pub fn artifact_path(output_dir: &Path, mode: CaptureMode, reference_timestamp: f64) -> PathBuf {
    let key = reference_timestamp as u64;
    output_dir
        .join(mode.namespace())
        .join(format!("{key}.{}", mode.extension()))
}
