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

//! CPU architecture and runtime version reporting.

use serde::{Serialize, Serializer};
use std::fmt;

/// Toolchain self-description captured by the build script.
const RUNTIME_VERSION: &str = env!("ENVPROBE_RUSTC_VERSION");

/// CPU architecture of the running process.
///
/// Architectures outside the four canonical values keep their native name
/// in [`CpuArchitecture::Other`] rather than being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CpuArchitecture {
    X86,
    X86_64,
    Arm32,
    Arm64,
    Other(String),
}

impl CpuArchitecture {
    /// Architecture of the running process.
    pub fn current() -> Self {
        Self::from_arch_name(std::env::consts::ARCH)
    }

    /// Map a Rust target architecture name (`std::env::consts::ARCH`).
    pub fn from_arch_name(arch: &str) -> Self {
        match arch {
            "x86" => CpuArchitecture::X86,
            "x86_64" => CpuArchitecture::X86_64,
            "arm" => CpuArchitecture::Arm32,
            "aarch64" => CpuArchitecture::Arm64,
            other if other.is_empty() => CpuArchitecture::Other("Unknown".to_string()),
            other => CpuArchitecture::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CpuArchitecture::X86 => "X86",
            CpuArchitecture::X86_64 => "X86_64",
            CpuArchitecture::Arm32 => "ARM32",
            CpuArchitecture::Arm64 => "ARM64",
            CpuArchitecture::Other(name) => name,
        }
    }
}

impl fmt::Display for CpuArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for CpuArchitecture {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Self-description of the Rust toolchain this binary was built with.
///
/// Returns `"Unknown"` when the build could not determine it.
pub fn runtime_version() -> String {
    let version = RUNTIME_VERSION.trim();
    if version.is_empty() {
        "Unknown".to_string()
    } else {
        version.to_string()
    }
}
