// src/capture/controller.rs

//! Per-cycle acquisition controller.
//!
//! Owns the mutable acquisition session and drives one full
//! decide→capture→validate→log cycle at a time. Capture failures are
//! never fatal: every cycle ends in a logged status record and control
//! returns to the scheduler loop.

use tracing::{info, warn};

use crate::capture::artifact_path;
use crate::capture::command::{clip_command, still_command};
use crate::capture::status::{StatusRecord, StatusRecorder};
use crate::capture::validate::OutputValidator;
use crate::config::model::{CameraSection, CaptureSection};
use crate::errors::Result;
use crate::exec::ProcessRunner;
use crate::types::CaptureMode;

/// Mutable acquisition state, created once at startup and owned by the
/// controller for the entire run. Never reset.
#[derive(Debug)]
pub struct AcquisitionSession {
    /// Mode of the current (or most recent) cycle.
    pub mode: CaptureMode,
    /// Wall-clock seconds identifying the current attempt's artifact.
    pub reference_timestamp: f64,
    /// Total failed cycles since startup. Monotone, +1 at most per cycle.
    pub cumulative_error_count: u64,
}

impl AcquisitionSession {
    pub fn new() -> Self {
        Self {
            mode: CaptureMode::StillImage,
            reference_timestamp: 0.0,
            cumulative_error_count: 0,
        }
    }

    fn update_time(&mut self, now: f64) {
        self.reference_timestamp = now;
    }

    fn add_error(&mut self, failed: bool) -> u64 {
        if failed {
            self.cumulative_error_count += 1;
        }
        self.cumulative_error_count
    }
}

impl Default for AcquisitionSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-cycle summary handed back to the scheduler loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub mode: CaptureMode,
    pub failed: bool,
}

/// Drives one capture cycle: selects the mode, runs the tool under its
/// deadline, validates the artifact and appends the status record.
pub struct AcquisitionController<R: ProcessRunner> {
    session: AcquisitionSession,
    runner: R,
    validator: OutputValidator,
    recorder: StatusRecorder,
    camera: CameraSection,
    capture: CaptureSection,
}

impl<R: ProcessRunner> AcquisitionController<R> {
    pub fn new(
        runner: R,
        validator: OutputValidator,
        recorder: StatusRecorder,
        camera: CameraSection,
        capture: CaptureSection,
    ) -> Self {
        Self {
            session: AcquisitionSession::new(),
            runner,
            validator,
            recorder,
            camera,
            capture,
        }
    }

    /// Run one full cycle at wall-clock time `now` (unix seconds).
    ///
    /// `trigger_motion` selects the mode: true → motion clip, false →
    /// still image. The caller's interval policy decides it.
    ///
    /// Only infrastructure failures (an unwritable status log, a broken
    /// wait on the child) return `Err`; a timed-out tool or a bad artifact
    /// is an ordinary failed cycle, counted and logged.
    pub async fn run_cycle(&mut self, trigger_motion: bool, now: f64) -> Result<CycleReport> {
        // A fresh timestamp per attempt keeps the artifact key unique.
        self.session.update_time(now);

        let mode = if trigger_motion {
            CaptureMode::MotionClip
        } else {
            CaptureMode::StillImage
        };
        self.session.mode = mode;

        let output = artifact_path(
            &self.capture.output_dir,
            mode,
            self.session.reference_timestamp,
        );
        let (spec, deadline) = match mode {
            CaptureMode::StillImage => (
                still_command(&self.camera, &output),
                self.capture.still_deadline(),
            ),
            CaptureMode::MotionClip => (
                clip_command(&self.camera, self.capture.clip_duration(), &output),
                self.capture.clip_deadline(),
            ),
        };

        info!(%mode, cmd = %spec.display_line(), "starting capture");

        let outcome = self.runner.run_with_deadline(spec, deadline).await?;
        let validation = self
            .validator
            .check(mode, self.session.reference_timestamp);

        let failed = outcome.timed_out || !validation.exists || !validation.size_valid;
        self.session.add_error(failed);

        let record = StatusRecord {
            reference_timestamp: self.session.reference_timestamp,
            mode,
            cumulative_error_count: self.session.cumulative_error_count,
            timed_out: outcome.timed_out,
            exists: validation.exists,
            size_valid: validation.size_valid,
        };
        self.recorder.append(&record)?;

        if failed {
            warn!(
                %mode,
                timed_out = outcome.timed_out,
                exists = validation.exists,
                size_valid = validation.size_valid,
                errors = self.session.cumulative_error_count,
                "capture cycle failed"
            );
        } else {
            info!(%mode, artifact = ?output, "capture cycle ok");
        }

        Ok(CycleReport { mode, failed })
    }

    pub fn session(&self) -> &AcquisitionSession {
        &self.session
    }

    pub fn error_count(&self) -> u64 {
        self.session.cumulative_error_count
    }
}
