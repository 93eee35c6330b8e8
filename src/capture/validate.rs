// src/capture/validate.rs

//! Artifact validation.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::capture::artifact_path;
use crate::fs::FileSystem;
use crate::types::CaptureMode;

/// Result of inspecting the artifact named by `(mode, reference_timestamp)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// The artifact is present on persistent storage.
    pub exists: bool,
    /// The artifact is strictly larger than the configured minimum size.
    /// Always false when `exists` is false.
    pub size_valid: bool,
}

/// Checks capture artifacts for existence and minimum size.
///
/// Read-only: never mutates or deletes an artifact.
#[derive(Debug, Clone)]
pub struct OutputValidator {
    fs: Arc<dyn FileSystem>,
    output_dir: PathBuf,
    min_artifact_bytes: u64,
}

impl OutputValidator {
    pub fn new(fs: Arc<dyn FileSystem>, output_dir: PathBuf, min_artifact_bytes: u64) -> Self {
        Self {
            fs,
            output_dir,
            min_artifact_bytes,
        }
    }

    /// Check the artifact for `(mode, reference_timestamp)`.
    ///
    /// A missing artifact short-circuits: `size_valid` is reported false
    /// without a size read being attempted.
    pub fn check(&self, mode: CaptureMode, reference_timestamp: f64) -> ValidationOutcome {
        let path = artifact_path(&self.output_dir, mode, reference_timestamp);

        if !self.fs.is_file(&path) {
            debug!(artifact = ?path, "artifact missing");
            return ValidationOutcome {
                exists: false,
                size_valid: false,
            };
        }

        let size_valid = match self.fs.file_size(&path) {
            Ok(size) => {
                if size <= self.min_artifact_bytes {
                    debug!(artifact = ?path, size, min = self.min_artifact_bytes, "artifact undersized");
                }
                size > self.min_artifact_bytes
            }
            Err(err) => {
                warn!(artifact = ?path, error = %err, "failed to read artifact size");
                false
            }
        };

        ValidationOutcome {
            exists: true,
            size_valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn validator(fs: &MockFileSystem) -> OutputValidator {
        OutputValidator::new(Arc::new(fs.clone()), PathBuf::from("/data"), 10_000)
    }

    #[test]
    fn missing_artifact_short_circuits_size_read() {
        let fs = MockFileSystem::new();
        let outcome = validator(&fs).check(CaptureMode::StillImage, 1000.0);

        assert_eq!(
            outcome,
            ValidationOutcome {
                exists: false,
                size_valid: false
            }
        );
        assert!(fs.size_reads().is_empty());
    }

    #[test]
    fn size_must_be_strictly_greater_than_minimum() {
        let fs = MockFileSystem::new();
        fs.add_file_of_size("/data/images/1000.jpg", 10_000);

        let outcome = validator(&fs).check(CaptureMode::StillImage, 1000.0);
        assert!(outcome.exists);
        assert!(!outcome.size_valid);
    }

    #[test]
    fn large_enough_artifact_is_valid() {
        let fs = MockFileSystem::new();
        fs.add_file_of_size("/data/videos/1000.h264", 10_001);

        let outcome = validator(&fs).check(CaptureMode::MotionClip, 1000.4);
        assert_eq!(
            outcome,
            ValidationOutcome {
                exists: true,
                size_valid: true
            }
        );
    }
}
