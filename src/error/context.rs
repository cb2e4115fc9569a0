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

use crate::error::ProbeError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a ProbeError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a ProbeError) -> Self {
        let (suggestion, details) = match error {
            ProbeError::PlatformNotSupported { required, actual } => {
                let suggestion = Some(format!(
                    "Use a mechanism that does not depend on {required}, or run this command on \
                     {required}."
                ));
                let details = Some(format!("Detected OS family: {actual}"));
                (suggestion, details)
            }
            ProbeError::VersionQuery(msg) => {
                let suggestion = Some(
                    "The OS version is reported as 'Unknown' in diagnostic output; features \
                     gated on the version stay disabled."
                        .to_string(),
                );
                let details = Some(format!("Version query failed: {msg}"));
                (suggestion, details)
            }
            ProbeError::CommandFailed { program, .. } => {
                let suggestion = Some(format!(
                    "Ensure '{program}' is installed and available in your PATH."
                ));
                let details = None;
                (suggestion, details)
            }
            ProbeError::CommandTimeout { .. } => {
                let enable_cmd = if cfg!(windows) {
                    "set ENVPROBE_RUNNER__TIMEOUT_SECS=30"
                } else {
                    "export ENVPROBE_RUNNER__TIMEOUT_SECS=30"
                };
                let suggestion = Some(format!(
                    "Increase the diagnostic command timeout: {enable_cmd}"
                ));
                let details = None;
                (suggestion, details)
            }
            ProbeError::ConfigError(msg) | ProbeError::InvalidConfig(msg) => {
                let suggestion = Some(
                    "Check config.toml and any ENVPROBE_* environment variables for typos."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            ProbeError::EntryPathUnavailable => {
                let suggestion = Some(
                    "The process command line and /proc entries may be hidden in restricted \
                     sandboxes or containers."
                        .to_string(),
                );
                let details = None;
                (suggestion, details)
            }
            ProbeError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        if cfg!(unix) {
                            Some("Check file permissions or run with sudo.".to_string())
                        } else {
                            Some("Run as Administrator or check file permissions.".to_string())
                        }
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
