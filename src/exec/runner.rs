// src/exec/runner.rs

//! Deadline-bounded external process execution.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::errors::Result;

/// A fully resolved external command: program plus ordered arguments.
///
/// Built by `capture::command`. Never a shell string, so there is nothing
/// to quote or escape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// One-line rendering for logs and `--dry-run` output.
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// How one capture attempt ended, deadline-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOutcome {
    /// True when the tool did not finish before its deadline.
    pub timed_out: bool,
}

/// Trait abstracting how a capture command is executed.
///
/// Production code uses [`RealProcessRunner`]; tests provide an
/// implementation that records invocations and pops scripted outcomes.
pub trait ProcessRunner: Send {
    /// Run `spec` to completion or until `deadline` elapses, whichever
    /// comes first.
    ///
    /// Completion before the deadline counts as *not* timed out regardless
    /// of the tool's exit status; the capture tool may exit non-zero on
    /// minor warnings, and the artifact check decides whether the cycle
    /// succeeded. Only a deadline breach sets `timed_out`.
    fn run_with_deadline(
        &mut self,
        spec: CommandSpec,
        deadline: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<CaptureOutcome>> + Send + '_>>;
}

/// Real process runner used in production.
///
/// The command is spawned in its own process group, so a deadline breach
/// can take down the tool and any children it forked in one signal. No
/// retry happens here; the caller's next cycle is the retry.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealProcessRunner;

impl ProcessRunner for RealProcessRunner {
    fn run_with_deadline(
        &mut self,
        spec: CommandSpec,
        deadline: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<CaptureOutcome>> + Send + '_>> {
        Box::pin(async move { run_process(spec, deadline).await })
    }
}

async fn run_process(spec: CommandSpec, deadline: Duration) -> Result<CaptureOutcome> {
    debug!(cmd = %spec.display_line(), ?deadline, "spawning capture tool");

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(unix)]
    cmd.process_group(0);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            // A command that cannot even be spawned is folded into the
            // timeout flag; the cycle fails and the next cycle retries.
            warn!(
                program = %spec.program,
                error = %err,
                "failed to spawn capture tool; reporting timeout"
            );
            return Ok(CaptureOutcome { timed_out: true });
        }
    };

    // Always consume stderr so buffers don't fill; log at debug.
    if let Some(stderr) = child.stderr.take() {
        let program = spec.program.clone();
        tokio::spawn(async move {
            let reader = BufReader::new(stderr);
            let mut lines = reader.lines();

            while let Ok(Some(line)) = lines.next_line().await {
                debug!(tool = %program, "stderr: {}", line);
            }
        });
    }

    match tokio::time::timeout(deadline, child.wait()).await {
        Ok(status_res) => {
            let status = status_res
                .with_context(|| format!("waiting for capture tool '{}'", spec.program))?;

            info!(
                tool = %spec.program,
                exit_code = status.code().unwrap_or(-1),
                success = status.success(),
                "capture tool exited"
            );

            Ok(CaptureOutcome { timed_out: false })
        }
        Err(_elapsed) => {
            warn!(
                tool = %spec.program,
                ?deadline,
                "capture tool exceeded deadline; killing process group"
            );
            terminate_group(&mut child).await;
            Ok(CaptureOutcome { timed_out: true })
        }
    }
}

/// Best-effort kill of the child's whole process group, then reap.
///
/// A group that is already gone is a no-op, not an error.
async fn terminate_group(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        // The child is its own group leader; the negative pid addresses
        // the entire group.
        unsafe {
            libc::kill(-(pid as i32), libc::SIGKILL);
        }
    }

    #[cfg(not(unix))]
    {
        let _ = child.start_kill();
    }

    let _ = child.wait().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_line_joins_program_and_args() {
        let spec = CommandSpec::new("raspistill").arg("-n").arg("-o").arg("/tmp/x.jpg");
        assert_eq!(spec.display_line(), "raspistill -n -o /tmp/x.jpg");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn completion_before_deadline_is_not_a_timeout() {
        let mut runner = RealProcessRunner;
        let spec = CommandSpec::new("true");
        let outcome = runner
            .run_with_deadline(spec, Duration::from_secs(5))
            .await
            .unwrap();
        assert!(!outcome.timed_out);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_not_a_timeout() {
        let mut runner = RealProcessRunner;
        let spec = CommandSpec::new("false");
        let outcome = runner
            .run_with_deadline(spec, Duration::from_secs(5))
            .await
            .unwrap();
        assert!(!outcome.timed_out);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn deadline_breach_kills_and_reports_timeout() {
        let mut runner = RealProcessRunner;
        let spec = CommandSpec::new("sleep").arg("5");
        let outcome = runner
            .run_with_deadline(spec, Duration::from_millis(100))
            .await
            .unwrap();
        assert!(outcome.timed_out);
    }

    #[tokio::test]
    async fn unspawnable_command_reports_timeout() {
        let mut runner = RealProcessRunner;
        let spec = CommandSpec::new("definitely-not-a-real-binary-2c9f");
        let outcome = runner
            .run_with_deadline(spec, Duration::from_secs(1))
            .await
            .unwrap();
        assert!(outcome.timed_out);
    }
}
