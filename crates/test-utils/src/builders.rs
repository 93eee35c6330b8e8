#![allow(dead_code)]

use std::path::PathBuf;

use dualcam::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
///
/// Starts from the rig defaults with `output_dir = "/data"` and all
/// pacing delays zeroed so loop tests run fast.
pub struct ConfigFileBuilder {
    raw: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        let mut raw = RawConfigFile::default();
        raw.capture.output_dir = PathBuf::from("/data");
        raw.capture.still_delay_secs = 0;
        raw.capture.idle_poll_secs = 0;
        Self { raw }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.raw.capture.output_dir = dir.into();
        self
    }

    pub fn min_artifact_bytes(mut self, bytes: u64) -> Self {
        self.raw.capture.min_artifact_bytes = bytes;
        self
    }

    pub fn clip_duration_secs(mut self, secs: u64) -> Self {
        self.raw.capture.clip_duration_secs = secs;
        self
    }

    pub fn clip_interval_minutes(mut self, minutes: u64) -> Self {
        self.raw.capture.clip_interval_minutes = minutes;
        self
    }

    pub fn still_delay_secs(mut self, secs: u64) -> Self {
        self.raw.capture.still_delay_secs = secs;
        self
    }

    pub fn idle_poll_secs(mut self, secs: u64) -> Self {
        self.raw.capture.idle_poll_secs = secs;
        self
    }

    pub fn gate_value_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw.gate.value_path = Some(path.into());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
