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

//! Operating system family classification.
//!
//! The family comes from the Rust runtime's own identification
//! (`std::env::consts::OS`), never from file paths or environment variables.
//! Every predicate exists both as a free function for the running process and
//! as a method on [`OsFamily`] so callers can evaluate a synthetic family.

use crate::error::{ProbeError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// Operating system family the probe distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
    Unknown,
}

impl OsFamily {
    /// Family of the running process.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map a Rust target OS name (`std::env::consts::OS`) to a family.
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "windows" => OsFamily::Windows,
            "macos" => OsFamily::MacOs,
            "linux" => OsFamily::Linux,
            _ => OsFamily::Unknown,
        }
    }

    pub fn is_windows(self) -> bool {
        self == OsFamily::Windows
    }

    pub fn is_macos(self) -> bool {
        self == OsFamily::MacOs
    }

    pub fn is_linux(self) -> bool {
        self == OsFamily::Linux
    }

    pub fn is_posix(self) -> bool {
        self.is_macos() || self.is_linux()
    }

    /// Name used in reports (`Windows`, `macOS`, `Linux`, `Unknown`).
    pub fn as_str(self) -> &'static str {
        match self {
            OsFamily::Windows => "Windows",
            OsFamily::MacOs => "macOS",
            OsFamily::Linux => "Linux",
            OsFamily::Unknown => "Unknown",
        }
    }

    pub fn ensure_windows(self) -> Result<()> {
        self.ensure(self.is_windows(), "Windows")
    }

    pub fn ensure_macos(self) -> Result<()> {
        self.ensure(self.is_macos(), "macOS")
    }

    pub fn ensure_linux(self) -> Result<()> {
        self.ensure(self.is_linux(), "Linux")
    }

    pub fn ensure_posix(self) -> Result<()> {
        self.ensure(self.is_posix(), "a POSIX-compliant OS")
    }

    fn ensure(self, supported: bool, required: &str) -> Result<()> {
        if supported {
            Ok(())
        } else {
            Err(ProbeError::PlatformNotSupported {
                required: required.to_string(),
                actual: self.to_string(),
            })
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for OsFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Check if the running OS is Windows
pub fn is_windows() -> bool {
    OsFamily::current().is_windows()
}

/// Check if the running OS is macOS
pub fn is_macos() -> bool {
    OsFamily::current().is_macos()
}

/// Check if the running OS is Linux
pub fn is_linux() -> bool {
    OsFamily::current().is_linux()
}

/// Check if the running OS is POSIX-compliant (macOS or Linux)
pub fn is_posix() -> bool {
    OsFamily::current().is_posix()
}

pub fn ensure_windows() -> Result<()> {
    OsFamily::current().ensure_windows()
}

pub fn ensure_macos() -> Result<()> {
    OsFamily::current().ensure_macos()
}

pub fn ensure_linux() -> Result<()> {
    OsFamily::current().ensure_linux()
}

pub fn ensure_posix() -> Result<()> {
    OsFamily::current().ensure_posix()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPORTED: [OsFamily; 3] = [OsFamily::Windows, OsFamily::MacOs, OsFamily::Linux];

    #[test]
    fn test_exactly_one_family_predicate_holds() {
        for family in SUPPORTED {
            let hits = [family.is_windows(), family.is_macos(), family.is_linux()]
                .iter()
                .filter(|hit| **hit)
                .count();
            assert_eq!(hits, 1, "{family} should match exactly one predicate");
            assert_eq!(family.is_posix(), family.is_macos() || family.is_linux());
        }
    }

    #[test]
    fn test_unknown_family_matches_nothing() {
        let family = OsFamily::Unknown;
        assert!(!family.is_windows());
        assert!(!family.is_macos());
        assert!(!family.is_linux());
        assert!(!family.is_posix());
    }

    #[test]
    fn test_from_os_name() {
        assert_eq!(OsFamily::from_os_name("windows"), OsFamily::Windows);
        assert_eq!(OsFamily::from_os_name("macos"), OsFamily::MacOs);
        assert_eq!(OsFamily::from_os_name("linux"), OsFamily::Linux);
        assert_eq!(OsFamily::from_os_name("freebsd"), OsFamily::Unknown);
        assert_eq!(OsFamily::from_os_name(""), OsFamily::Unknown);
    }

    #[test]
    fn test_current_matches_compile_target() {
        let family = OsFamily::current();
        assert_eq!(family.is_windows(), cfg!(target_os = "windows"));
        assert_eq!(family.is_macos(), cfg!(target_os = "macos"));
        assert_eq!(family.is_linux(), cfg!(target_os = "linux"));
        assert_eq!(is_posix(), is_macos() || is_linux());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(OsFamily::Windows.to_string(), "Windows");
        assert_eq!(OsFamily::MacOs.to_string(), "macOS");
        assert_eq!(OsFamily::Linux.to_string(), "Linux");
        assert_eq!(OsFamily::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_ensure_succeeds_for_matching_family() {
        assert!(OsFamily::Windows.ensure_windows().is_ok());
        assert!(OsFamily::MacOs.ensure_macos().is_ok());
        assert!(OsFamily::Linux.ensure_linux().is_ok());
        assert!(OsFamily::MacOs.ensure_posix().is_ok());
        assert!(OsFamily::Linux.ensure_posix().is_ok());
    }

    #[test]
    fn test_ensure_fails_with_platform_not_supported() {
        let err = OsFamily::Linux
            .ensure_windows()
            .expect_err("Linux is not Windows");
        match err {
            ProbeError::PlatformNotSupported { required, actual } => {
                assert_eq!(required, "Windows");
                assert_eq!(actual, "Linux");
            }
            other => panic!("unexpected error variant: {other:?}"),
        }

        assert!(OsFamily::Windows.ensure_posix().is_err());
        assert!(OsFamily::Unknown.ensure_posix().is_err());
        assert!(OsFamily::Unknown.ensure_linux().is_err());
        assert!(OsFamily::Windows.ensure_macos().is_err());
    }

    #[test]
    fn test_ensure_current_matches_predicate() {
        assert_eq!(ensure_windows().is_ok(), is_windows());
        assert_eq!(ensure_macos().is_ok(), is_macos());
        assert_eq!(ensure_linux().is_ok(), is_linux());
        assert_eq!(ensure_posix().is_ok(), is_posix());
    }

    #[test]
    fn test_serializes_as_display_name() {
        let json = serde_json::to_string(&OsFamily::MacOs).unwrap();
        assert_eq!(json, "\"macOS\"");
    }
}
