// src/capture/status.rs

//! Append-only status log.
//!
//! One line per cycle, comma-separated, newline-terminated:
//!
//! ```text
//! reference_timestamp(%.1f),mode(0|1),cumulative_error_count,timed_out(0|1),exists(0|1),size_valid(0|1)
//! ```
//!
//! External monitoring parses this literally; field order and formatting
//! are frozen. The log grows without bound and is never rotated here.

use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::CaptureMode;

/// Immutable snapshot of one cycle, as written to the status log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusRecord {
    pub reference_timestamp: f64,
    pub mode: CaptureMode,
    pub cumulative_error_count: u64,
    pub timed_out: bool,
    pub exists: bool,
    pub size_valid: bool,
}

impl StatusRecord {
    /// Serialize to the frozen log line format, including the trailing
    /// newline.
    pub fn to_line(&self) -> String {
        format!(
            "{:.1},{},{},{},{},{}\n",
            self.reference_timestamp,
            self.mode.log_field(),
            self.cumulative_error_count,
            u8::from(self.timed_out),
            u8::from(self.exists),
            u8::from(self.size_valid),
        )
    }
}

/// Appends status records to the durable log, one open-write-close per
/// record.
#[derive(Debug, Clone)]
pub struct StatusRecorder {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl StatusRecorder {
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf) -> Self {
        Self { fs, path }
    }

    pub fn append(&self, record: &StatusRecord) -> Result<()> {
        self.fs.append(&self.path, record.to_line().as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use std::path::Path;

    #[test]
    fn line_format_is_frozen() {
        let record = StatusRecord {
            reference_timestamp: 1000.0,
            mode: CaptureMode::StillImage,
            cumulative_error_count: 3,
            timed_out: false,
            exists: true,
            size_valid: true,
        };
        assert_eq!(record.to_line(), "1000.0,0,3,0,1,1\n");
    }

    #[test]
    fn fractional_timestamps_keep_one_decimal() {
        let record = StatusRecord {
            reference_timestamp: 1613521847.73,
            mode: CaptureMode::MotionClip,
            cumulative_error_count: 0,
            timed_out: true,
            exists: false,
            size_valid: false,
        };
        assert_eq!(record.to_line(), "1613521847.7,1,0,1,0,0\n");
    }

    #[test]
    fn appends_accumulate_without_mutation() {
        let fs = MockFileSystem::new();
        let recorder = StatusRecorder::new(
            Arc::new(fs.clone()),
            PathBuf::from("/data/dualcam_status.log"),
        );

        let first = StatusRecord {
            reference_timestamp: 1000.0,
            mode: CaptureMode::StillImage,
            cumulative_error_count: 0,
            timed_out: false,
            exists: true,
            size_valid: true,
        };
        let second = StatusRecord {
            reference_timestamp: 1003.0,
            mode: CaptureMode::MotionClip,
            cumulative_error_count: 1,
            timed_out: true,
            exists: false,
            size_valid: false,
        };

        recorder.append(&first).unwrap();
        recorder.append(&second).unwrap();

        let log = fs
            .read_to_string(Path::new("/data/dualcam_status.log"))
            .unwrap();
        assert_eq!(log, "1000.0,0,0,0,1,1\n1003.0,1,1,1,0,0\n");
    }
}
