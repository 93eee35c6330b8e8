#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use dualcam::capture::{AcquisitionController, OutputValidator, StatusRecorder};
use dualcam::config::ConfigFile;
use dualcam::fs::FileSystem;
use dualcam::fs::mock::MockFileSystem;
use dualcam_test_utils::fake_runner::{FakeProcessRunner, Invocation};

pub use dualcam_test_utils::init_tracing;

/// Controller wired over a mock filesystem and a scripted fake runner.
///
/// The mock filesystem handle is a clone sharing state with the one inside
/// the validator/recorder, so tests can seed artifacts and read the status
/// log directly.
pub struct Harness {
    pub controller: AcquisitionController<FakeProcessRunner>,
    pub fs: MockFileSystem,
    pub invocations: Arc<Mutex<Vec<Invocation>>>,
    pub cfg: ConfigFile,
}

impl Harness {
    pub fn new(cfg: ConfigFile, timed_out_script: impl IntoIterator<Item = bool>) -> Self {
        let fs = MockFileSystem::new();
        fs.add_dir(cfg.capture.output_dir.join("images"));
        fs.add_dir(cfg.capture.output_dir.join("videos"));

        let runner = FakeProcessRunner::new(timed_out_script);
        let invocations = runner.invocations();

        let validator = OutputValidator::new(
            Arc::new(fs.clone()),
            cfg.capture.output_dir.clone(),
            cfg.capture.min_artifact_bytes,
        );
        let recorder = StatusRecorder::new(Arc::new(fs.clone()), cfg.capture.status_log_path());
        let controller = AcquisitionController::new(
            runner,
            validator,
            recorder,
            cfg.camera.clone(),
            cfg.capture.clone(),
        );

        Harness {
            controller,
            fs,
            invocations,
            cfg,
        }
    }

    /// Current contents of the status log; empty string if nothing was
    /// ever appended.
    pub fn status_log(&self) -> String {
        self.fs
            .read_to_string(&self.cfg.capture.status_log_path())
            .unwrap_or_default()
    }
}
