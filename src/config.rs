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

use crate::error::{ProbeError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_DIR_NAME: &str = "envprobe";
const CONFIG_PATH_ENV: &str = "ENVPROBE_CONFIG";
const ENV_PREFIX: &str = "ENVPROBE";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProbeConfig {
    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Upper bound for diagnostic subprocesses; `0` waits indefinitely.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RunnerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_color() -> bool {
    true
}

/// Location of the user configuration file.
///
/// `ENVPROBE_CONFIG` wins over the per-user config directory.
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration from the default file location and `ENVPROBE_*` variables.
pub fn new_probe_config() -> Result<ProbeConfig> {
    ProbeConfig::load(config_file_path().as_deref())
}

impl ProbeConfig {
    /// Load configuration layering the optional file under environment overrides.
    ///
    /// Environment keys use `__` between section and key, e.g.
    /// `ENVPROBE_RUNNER__TIMEOUT_SECS=30`.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_file {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
            } else {
                log::debug!("Config file not found at {}, using defaults", path.display());
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: ProbeConfig = settings
            .try_deserialize()
            .map_err(|e| ProbeError::InvalidConfig(e.to_string()))?;

        log::trace!("Effective configuration: {config:?}");
        Ok(config)
    }
}
