// src/schedule/mod.rs

//! Scheduler loop: gate polling, interval policy and pacing.
//!
//! The decision logic lives in [`policy`] as a pure state machine; the
//! async loop in [`runner`] wires it to the gate, the controller and the
//! tokio clock. This mirrors the pure-core/IO-shell split used elsewhere
//! in the crate.

use std::time::Duration;

use crate::types::CaptureMode;

pub mod policy;
pub mod runner;

pub use policy::SchedulePolicy;
pub use runner::{LoopOptions, SchedulerLoop};

/// Pause applied after a completed cycle before the next gate poll.
///
/// A clip's own duration already paces the loop, so only still cycles
/// carry the short fixed delay.
pub fn post_cycle_pause(mode: CaptureMode, still_delay: Duration) -> Option<Duration> {
    match mode {
        CaptureMode::StillImage => Some(still_delay),
        CaptureMode::MotionClip => None,
    }
}
