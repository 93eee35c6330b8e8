use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use dualcam::gate::Gate;

/// Gate that replays a scripted sequence of values, then holds `fallback`.
///
/// `polls()` exposes how often the gate has been read.
pub struct ScriptedGate {
    values: VecDeque<bool>,
    fallback: bool,
    polls: Arc<Mutex<u64>>,
}

impl ScriptedGate {
    pub fn new(values: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback,
            polls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn always(value: bool) -> Self {
        Self::new([], value)
    }

    pub fn polls(&self) -> Arc<Mutex<u64>> {
        Arc::clone(&self.polls)
    }
}

impl Gate for ScriptedGate {
    fn is_high(&mut self) -> bool {
        *self.polls.lock().unwrap() += 1;
        self.values.pop_front().unwrap_or(self.fallback)
    }
}
