// Terrain Bench - Terrain Generation Benchmark Sweeps
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Workload invocation.
//!
//! [`ProcessInvoker`] launches the terrain generator for one
//! [`ConfigCell`], waits up to a fixed ceiling and classifies the outcome.
//! It never retries: a failed run is reported and the caller moves on.

use crate::core::ConfigCell;
use crate::harness::interrupt::Interrupt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How often a running workload is polled for exit, timeout and interruption.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long captured output keeps draining after the workload exits.
///
/// A background process that inherited the pipes can hold them open past
/// the workload's exit; whatever arrived by then is kept.
pub const DEFAULT_DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Result of one workload invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationOutcome {
    /// Exit status 0.
    Success {
        /// Captured standard output.
        stdout: String,
        /// Process start to observed exit. Exit is observed by polling, so
        /// this can overshoot the true runtime by up to one poll interval.
        wall_clock: Duration,
    },
    /// The ceiling elapsed and the process was killed.
    Timeout {
        /// Time waited before the kill.
        after: Duration,
    },
    /// Non-zero exit status (or killed by a signal).
    Failed {
        /// Exit code, if the process exited normally.
        status: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },
    /// The process could not be started or waited on.
    LaunchFailed {
        /// Underlying OS error.
        message: String,
    },
    /// The user interrupted the sweep; the process was killed.
    Interrupted,
}

impl InvocationOutcome {
    /// Returns whether the workload exited with status 0.
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Success { .. })
    }
}

/// Anything that can execute one run of a configuration cell.
///
/// The sweep engine only talks to this trait, so tests can script
/// workloads without spawning processes.
pub trait Workload {
    /// Runs the workload once for `cell`.
    fn invoke(&self, cell: &ConfigCell) -> InvocationOutcome;
}

/// Runs the external workload executable as a child process.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    executable: PathBuf,
    timeout: Duration,
    poll_interval: Duration,
    drain_grace: Duration,
    interrupt: Interrupt,
}

impl ProcessInvoker {
    /// Creates an invoker for `executable` with the given per-run ceiling.
    pub fn new(executable: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            executable: executable.into(),
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
            drain_grace: DEFAULT_DRAIN_GRACE,
            interrupt: Interrupt::new(),
        }
    }

    /// Attaches the sweep's interruption flag.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Sets the polling interval used while waiting.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets how long output keeps draining after the workload exits.
    pub fn with_drain_grace(mut self, grace: Duration) -> Self {
        self.drain_grace = grace;
        self
    }

    /// The executable this invoker launches.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// The per-run ceiling.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Workload for ProcessInvoker {
    fn invoke(&self, cell: &ConfigCell) -> InvocationOutcome {
        debug!(executable = %self.executable.display(), args = ?cell.args(), "launching workload");

        let start = Instant::now();
        let mut child = match Command::new(&self.executable)
            .args(cell.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return InvocationOutcome::LaunchFailed {
                    message: e.to_string(),
                }
            }
        };

        // Drain both pipes concurrently so a chatty workload cannot block on a full pipe.
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if self.interrupt.is_triggered() {
                        reap(&mut child);
                        return InvocationOutcome::Interrupted;
                    }
                    let waited = start.elapsed();
                    if waited >= self.timeout {
                        reap(&mut child);
                        return InvocationOutcome::Timeout { after: waited };
                    }
                    thread::sleep(self.poll_interval);
                }
                Err(e) => {
                    reap(&mut child);
                    return InvocationOutcome::LaunchFailed {
                        message: e.to_string(),
                    };
                }
            }
        };
        let wall_clock = start.elapsed();

        let deadline = Instant::now() + self.drain_grace;
        let stdout = self.collect(stdout, deadline);
        let stderr = self.collect(stderr, deadline);

        if status.success() {
            InvocationOutcome::Success { stdout, wall_clock }
        } else {
            InvocationOutcome::Failed {
                status: status.code(),
                stderr,
            }
        }
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl ProcessInvoker {
    /// Gathers a pipe's output until it closes, `deadline` passes or the
    /// sweep is interrupted.
    fn collect(&self, chunks: Option<Receiver<Vec<u8>>>, deadline: Instant) -> String {
        let Some(chunks) = chunks else {
            return String::new();
        };
        let mut buf = Vec::new();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || self.interrupt.is_triggered() {
                buf.extend(chunks.try_iter().flatten());
                warn!("workload output still open after exit, keeping what was read");
                break;
            }
            match chunks.recv_timeout(remaining.min(self.poll_interval)) {
                Ok(chunk) => buf.extend_from_slice(&chunk),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn spawn_reader<R>(source: Option<R>) -> Option<Receiver<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    source.map(|mut source| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut chunk = [0u8; 8192];
            loop {
                match source.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        if tx.send(chunk[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        rx
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn cell() -> ConfigCell {
        ConfigCell::new(256, 2, 1, 424_242)
    }

    #[test]
    fn test_success_captures_stdout_and_args() {
        let dir = TempDir::new().unwrap();
        let exe = script(&dir, "ok.sh", "echo \"$1 $2 $3 $4 $5\"");
        let outcome = ProcessInvoker::new(exe, Duration::from_secs(10)).invoke(&cell());

        match outcome {
            InvocationOutcome::Success { stdout, wall_clock } => {
                assert_eq!(stdout.trim(), "256 256 2 1 424242");
                assert!(wall_clock < Duration::from_secs(10));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_nonzero_exit_captures_stderr() {
        let dir = TempDir::new().unwrap();
        let exe = script(&dir, "fail.sh", "echo 'out of memory' >&2\nexit 3");
        let outcome = ProcessInvoker::new(exe, Duration::from_secs(10)).invoke(&cell());

        match outcome {
            InvocationOutcome::Failed { status, stderr } => {
                assert_eq!(status, Some(3));
                assert!(stderr.contains("out of memory"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_timeout_kills_process() {
        let dir = TempDir::new().unwrap();
        let exe = script(&dir, "hang.sh", "exec sleep 30");
        let start = Instant::now();
        let outcome = ProcessInvoker::new(exe, Duration::from_millis(200)).invoke(&cell());

        assert!(matches!(outcome, InvocationOutcome::Timeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_background_holder_does_not_block_past_grace() {
        let dir = TempDir::new().unwrap();
        let exe = script(&dir, "fork.sh", "sleep 30 &\necho done");
        let start = Instant::now();
        let outcome = ProcessInvoker::new(exe, Duration::from_secs(10))
            .with_drain_grace(Duration::from_millis(200))
            .invoke(&cell());

        match outcome {
            InvocationOutcome::Success { stdout, .. } => assert_eq!(stdout.trim(), "done"),
            other => panic!("expected success, got {:?}", other),
        }
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_wall_clock_within_one_poll_interval() {
        let dir = TempDir::new().unwrap();
        let exe = script(&dir, "nap.sh", "sleep 0.3");
        let outcome = ProcessInvoker::new(exe, Duration::from_secs(10))
            .with_poll_interval(Duration::from_millis(5))
            .invoke(&cell());

        match outcome {
            InvocationOutcome::Success { wall_clock, .. } => {
                assert!(wall_clock >= Duration::from_millis(300));
                assert!(wall_clock < Duration::from_secs(3));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_executable() {
        let dir = TempDir::new().unwrap();
        let outcome = ProcessInvoker::new(dir.path().join("absent"), Duration::from_secs(1))
            .invoke(&cell());
        assert!(matches!(outcome, InvocationOutcome::LaunchFailed { .. }));
    }

    #[test]
    fn test_interrupt_kills_process() {
        let dir = TempDir::new().unwrap();
        let exe = script(&dir, "hang.sh", "exec sleep 30");
        let interrupt = Interrupt::new();
        interrupt.trigger();

        let outcome = ProcessInvoker::new(exe, Duration::from_secs(30))
            .with_interrupt(interrupt)
            .invoke(&cell());
        assert_eq!(outcome, InvocationOutcome::Interrupted);
    }
}
