// src/gate.rs

//! Gating signal boundary.
//!
//! The loop only ever consumes the current boolean value of the signal,
//! never edges or history. Electrical semantics (pull-ups, debounce) are
//! outside this crate; production reads a GPIO value file exported through
//! sysfs.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

/// Source of the acquisition gating signal; true = capture allowed.
pub trait Gate: Send {
    fn is_high(&mut self) -> bool;
}

/// Gate that is always high, for ungated bench rigs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysHigh;

impl Gate for AlwaysHigh {
    fn is_high(&mut self) -> bool {
        true
    }
}

/// Reads a sysfs GPIO value file (`/sys/class/gpio/gpioN/value`).
///
/// A read failure counts as low.
#[derive(Debug)]
pub struct SysfsGate {
    path: PathBuf,
}

impl SysfsGate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Gate for SysfsGate {
    fn is_high(&mut self) -> bool {
        match fs::read_to_string(&self.path) {
            Ok(value) => value.trim() == "1",
            Err(err) => {
                warn!(path = ?self.path, error = %err, "failed to read gate value; treating as low");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sysfs_gate_reads_value_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value");

        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"1\n")
            .unwrap();
        assert!(SysfsGate::new(&path).is_high());

        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"0\n")
            .unwrap();
        assert!(!SysfsGate::new(&path).is_high());
    }

    #[test]
    fn missing_value_file_reads_low() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!SysfsGate::new(dir.path().join("gone")).is_high());
    }
}
