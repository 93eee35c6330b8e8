// src/schedule/policy.rs

//! Pure interval policy for still-vs-clip selection.

use std::time::{Duration, Instant};

/// Decides when a motion clip is due.
///
/// No clocks, no IO: the loop hands in `Instant`s, which keeps the policy
/// deterministic under test.
#[derive(Debug)]
pub struct SchedulePolicy {
    clip_interval: Duration,
    last_clip: Option<Instant>,
}

impl SchedulePolicy {
    pub fn new(clip_interval: Duration) -> Self {
        Self {
            clip_interval,
            last_clip: None,
        }
    }

    /// Whether the cycle starting at `now` should capture a motion clip.
    ///
    /// The very first eligible tick always does, bootstrapping the first
    /// clip instead of waiting a full interval.
    pub fn trigger_motion(&self, now: Instant) -> bool {
        match self.last_clip {
            None => true,
            Some(last) => now.duration_since(last) > self.clip_interval,
        }
    }

    /// Record that a motion clip cycle started at `started`.
    pub fn note_clip(&mut self, started: Instant) {
        self.last_clip = Some(started);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_eligible_tick_triggers_a_clip() {
        let policy = SchedulePolicy::new(Duration::from_secs(600));
        assert!(policy.trigger_motion(Instant::now()));
    }

    #[test]
    fn below_interval_selects_still() {
        let mut policy = SchedulePolicy::new(Duration::from_secs(600));
        let t0 = Instant::now();
        policy.note_clip(t0);

        assert!(!policy.trigger_motion(t0 + Duration::from_secs(1)));
        // Exactly at the interval is still not due; the elapsed time must
        // exceed it.
        assert!(!policy.trigger_motion(t0 + Duration::from_secs(600)));
    }

    #[test]
    fn past_interval_triggers_a_clip() {
        let mut policy = SchedulePolicy::new(Duration::from_secs(600));
        let t0 = Instant::now();
        policy.note_clip(t0);

        assert!(policy.trigger_motion(t0 + Duration::from_secs(601)));
    }

    #[test]
    fn noting_a_clip_resets_the_interval() {
        let mut policy = SchedulePolicy::new(Duration::from_secs(600));
        let t0 = Instant::now();
        policy.note_clip(t0);
        policy.note_clip(t0 + Duration::from_secs(700));

        assert!(!policy.trigger_motion(t0 + Duration::from_secs(800)));
    }
}
