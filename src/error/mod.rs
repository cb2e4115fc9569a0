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

mod context;
mod exit_codes;
mod format;
#[cfg(test)]
mod tests;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("This operation requires {required}, but the current platform is {actual}")]
    PlatformNotSupported { required: String, actual: String },

    #[error("Failed to query OS version: {0}")]
    VersionQuery(String),

    #[error("Failed to run '{program}': {message}")]
    CommandFailed { program: String, message: String },

    #[error("'{program}' did not finish within {timeout_secs}s")]
    CommandTimeout { program: String, timeout_secs: u64 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Native entry path could not be determined")]
    EntryPathUnavailable,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ProbeError {
    fn from(err: config::ConfigError) -> Self {
        ProbeError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
