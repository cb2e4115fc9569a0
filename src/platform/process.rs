// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Process runner used for diagnostic commands.
//!
//! The probe only supplies a program, its arguments and the request to
//! capture standard output; starting, waiting and stream capture belong to
//! the [`ProcessRunner`] implementation.

use crate::config::RunnerConfig;
use crate::error::{ProbeError, Result};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Exit status and captured standard output of a finished command.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
}

impl CommandOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: stdout.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a command synchronously and captures its standard output.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// [`ProcessRunner`] backed by `std::process::Command`.
#[derive(Clone, Debug, Default)]
pub struct SystemProcessRunner {
    timeout: Option<Duration>,
}

impl SystemProcessRunner {
    /// Runner that blocks until the child exits.
    pub fn new() -> Self {
        Self { timeout: None }
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self::with_timeout(config.timeout())
    }

    fn spawn_error(program: &str, err: std::io::Error) -> ProbeError {
        ProbeError::CommandFailed {
            program: program.to_string(),
            message: err.to_string(),
        }
    }

    fn run_to_completion(&self, program: &str, command: &mut Command) -> Result<CommandOutput> {
        let output = command
            .output()
            .map_err(|e| Self::spawn_error(program, e))?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    fn run_with_deadline(
        &self,
        program: &str,
        command: &mut Command,
        timeout: Duration,
    ) -> Result<CommandOutput> {
        let mut child = command
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| Self::spawn_error(program, e))?;

        // Drain stdout while waiting so a chatty child cannot block on a full pipe.
        let (sender, receiver) = mpsc::channel();
        if let Some(mut stdout) = child.stdout.take() {
            thread::spawn(move || {
                let mut buffer = Vec::new();
                let _ = stdout.read_to_end(&mut buffer);
                let _ = sender.send(buffer);
            });
        }

        let timed_out = || ProbeError::CommandTimeout {
            program: program.to_string(),
            timeout_secs: timeout.as_secs(),
        };

        let deadline = Instant::now() + timeout;
        let status = loop {
            let polled = match child.try_wait() {
                Ok(polled) => polled,
                Err(e) => {
                    Self::terminate(&mut child);
                    return Err(e.into());
                }
            };
            if let Some(status) = polled {
                break status;
            }
            if Instant::now() >= deadline {
                log::warn!("Diagnostic process '{program}' exceeded {timeout:?}, terminating");
                Self::terminate(&mut child);
                return Err(timed_out());
            }
            thread::sleep(POLL_INTERVAL);
        };

        // Descendants may still hold the pipe open after the child exits.
        let remaining = deadline.saturating_duration_since(Instant::now());
        let stdout = match receiver.recv_timeout(remaining) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(RecvTimeoutError::Timeout) => {
                log::warn!(
                    "Output of diagnostic process '{program}' still open after {timeout:?}, giving up"
                );
                return Err(timed_out());
            }
            Err(RecvTimeoutError::Disconnected) => String::new(),
        };

        Ok(CommandOutput {
            exit_code: status.code(),
            stdout,
        })
    }

    fn terminate(child: &mut Child) {
        let _ = child.kill();
        let _ = child.wait();
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        log::debug!("Launching diagnostic process: {program} {}", args.join(" "));

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null());

        let output = match self.timeout {
            Some(timeout) => self.run_with_deadline(program, &mut command, timeout)?,
            None => self.run_to_completion(program, &mut command)?,
        };

        log::trace!(
            "Diagnostic process {program} exited with {:?} ({} bytes of output)",
            output.exit_code,
            output.stdout.len()
        );
        Ok(output)
    }
}
