use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dualcam::errors::Result;
use dualcam::exec::{CaptureOutcome, CommandSpec, ProcessRunner};

/// One recorded call to the fake runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub spec: CommandSpec,
    pub deadline: Duration,
}

/// A fake process runner that:
/// - records every command and deadline it is asked to run
/// - pops scripted outcomes instead of spawning processes.
///
/// When the script runs out, further calls report completion before the
/// deadline (`timed_out = false`).
pub struct FakeProcessRunner {
    outcomes: VecDeque<CaptureOutcome>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl FakeProcessRunner {
    /// `timed_out_script`: per-call values for `CaptureOutcome::timed_out`.
    pub fn new(timed_out_script: impl IntoIterator<Item = bool>) -> Self {
        Self {
            outcomes: timed_out_script
                .into_iter()
                .map(|timed_out| CaptureOutcome { timed_out })
                .collect(),
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All calls complete before the deadline.
    pub fn always_completing() -> Self {
        Self::new([])
    }

    /// Shared handle to the recorded invocations.
    pub fn invocations(&self) -> Arc<Mutex<Vec<Invocation>>> {
        Arc::clone(&self.invocations)
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn run_with_deadline(
        &mut self,
        spec: CommandSpec,
        deadline: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<CaptureOutcome>> + Send + '_>> {
        self.invocations
            .lock()
            .unwrap()
            .push(Invocation { spec, deadline });

        let outcome = self
            .outcomes
            .pop_front()
            .unwrap_or(CaptureOutcome { timed_out: false });

        Box::pin(async move { Ok(outcome) })
    }
}
