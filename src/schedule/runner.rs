// src/schedule/runner.rs

//! Async scheduler loop.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::capture::AcquisitionController;
use crate::config::model::CaptureSection;
use crate::errors::Result;
use crate::exec::ProcessRunner;
use crate::gate::Gate;
use crate::schedule::policy::SchedulePolicy;
use crate::schedule::post_cycle_pause;
use crate::types::CaptureMode;

/// Loop behaviour knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    /// Exit after the first executed capture cycle (`--once`). Gate-low
    /// polls do not count.
    pub once: bool,

    /// Stop after this many gate polls. Used by tests; `None` in
    /// production.
    pub max_polls: Option<u64>,
}

/// Drives the acquisition controller once per eligible tick.
///
/// Strictly sequential: a cycle runs to completion, including the blocking
/// tool execution, before the next gate poll. The gate is re-read every
/// tick; while it is low nothing runs and nothing is logged.
pub struct SchedulerLoop<R: ProcessRunner> {
    controller: AcquisitionController<R>,
    gate: Box<dyn Gate>,
    policy: SchedulePolicy,
    capture: CaptureSection,
    options: LoopOptions,
    shutdown_rx: watch::Receiver<bool>,
}

impl<R: ProcessRunner> SchedulerLoop<R> {
    pub fn new(
        controller: AcquisitionController<R>,
        gate: Box<dyn Gate>,
        capture: CaptureSection,
        options: LoopOptions,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        let policy = SchedulePolicy::new(capture.clip_interval());
        Self {
            controller,
            gate,
            policy,
            capture,
            options,
            shutdown_rx,
        }
    }

    /// Main loop. Returns when shut down, after `--once`, or at the test
    /// poll limit.
    pub async fn run(mut self) -> Result<()> {
        info!("acquisition loop started");

        let mut polls: u64 = 0;

        loop {
            if self.shutdown_requested() {
                info!("shutdown requested; stopping acquisition loop");
                break;
            }
            if let Some(max) = self.options.max_polls {
                if polls >= max {
                    debug!(polls, "poll limit reached; stopping");
                    break;
                }
            }
            polls += 1;

            if !self.gate.is_high() {
                debug!("gate low; skipping cycle");
                if !self.pause(self.capture.idle_poll()).await {
                    break;
                }
                continue;
            }

            let started = Instant::now();
            let trigger_motion = self.policy.trigger_motion(started);

            let report = self.controller.run_cycle(trigger_motion, unix_now()).await?;

            if report.mode == CaptureMode::MotionClip {
                // Interval measured from the cycle's start, not its end.
                self.policy.note_clip(started);
            }

            if self.options.once {
                info!("single cycle complete; exiting");
                break;
            }

            if let Some(delay) = post_cycle_pause(report.mode, self.capture.still_delay()) {
                if !self.pause(delay).await {
                    break;
                }
            }
        }

        info!(
            errors = self.controller.error_count(),
            "acquisition loop exiting"
        );
        Ok(())
    }

    fn shutdown_requested(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// Sleep for `delay`, returning false if shutdown interrupts it.
    async fn pause(&mut self, delay: Duration) -> bool {
        if delay.is_zero() {
            return true;
        }
        tokio::select! {
            _ = sleep(delay) => true,
            _ = self.shutdown_rx.changed() => false,
        }
    }
}

/// Current wall-clock time as unix seconds.
fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
