// src/config/mod.rs

//! Configuration loading and validation.
//!
//! - [`model`] defines the TOML schema (`[camera]`, `[capture]`, `[gate]`).
//! - [`loader`] reads and deserializes a config file.
//! - [`validate`] turns a `RawConfigFile` into a checked `ConfigFile`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{CameraSection, CaptureSection, ConfigFile, GateSection, RawConfigFile};
