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

//! Aggregated platform facts.

use crate::platform::arch::{CpuArchitecture, runtime_version};
use crate::platform::family::OsFamily;
use crate::platform::privilege::is_elevated_user;
use crate::platform::process::{ProcessRunner, SystemProcessRunner};
use crate::platform::version::{is_windows_broker_supported_with, os_version_with, query_raw_version};
use serde::Serialize;

/// Immutable description of the running platform.
///
/// Every field is always populated. Facts that cannot be determined are
/// reported as `"Unknown"` rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformSnapshot {
    pub os_family: OsFamily,
    pub os_version: String,
    pub cpu_architecture: CpuArchitecture,
    pub runtime_version: String,
}

/// Snapshot of the running platform.
pub fn platform_information() -> PlatformSnapshot {
    platform_information_with(OsFamily::current(), &SystemProcessRunner::new())
}

/// Snapshot for `family`, running version commands through `runner`.
pub fn platform_information_with(family: OsFamily, runner: &dyn ProcessRunner) -> PlatformSnapshot {
    let snapshot = PlatformSnapshot {
        os_family: family,
        os_version: os_version_with(family, runner),
        cpu_architecture: CpuArchitecture::current(),
        runtime_version: runtime_version(),
    };
    log::debug!("Platform snapshot: {snapshot:?}");
    snapshot
}

/// Capability flags of the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub is_posix: bool,
    pub is_elevated_user: bool,
    pub windows_broker_supported: bool,
}

impl Capabilities {
    pub fn detect() -> Self {
        Self::detect_for(OsFamily::current())
    }

    pub fn detect_for(family: OsFamily) -> Self {
        Self {
            is_posix: family.is_posix(),
            is_elevated_user: is_elevated_user(),
            windows_broker_supported: is_windows_broker_supported_with(family, query_raw_version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::platform::process::{CommandOutput, MockProcessRunner};

    fn failing_runner() -> MockProcessRunner {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|program, _| {
            Err(ProbeError::CommandFailed {
                program: program.to_string(),
                message: "not found".to_string(),
            })
        });
        runner
    }

    #[test]
    fn test_snapshot_uses_runner_output() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_, _| Ok(CommandOutput::new(0, "14.5\n")));

        let snapshot = platform_information_with(OsFamily::MacOs, &runner);
        assert_eq!(snapshot.os_family, OsFamily::MacOs);
        assert_eq!(snapshot.os_version, "14.5");
        assert_eq!(snapshot.cpu_architecture, CpuArchitecture::current());
    }

    #[test]
    fn test_snapshot_fields_never_empty_on_failure() {
        for family in [OsFamily::MacOs, OsFamily::Linux] {
            let snapshot = platform_information_with(family, &failing_runner());
            assert_eq!(snapshot.os_version, "Unknown");
            assert!(!snapshot.cpu_architecture.as_str().is_empty());
            assert!(!snapshot.runtime_version.is_empty());
        }
    }

    #[test]
    fn test_unknown_family_snapshot() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().never();

        let snapshot = platform_information_with(OsFamily::Unknown, &runner);
        assert_eq!(snapshot.os_family.to_string(), "Unknown");
        assert_eq!(snapshot.os_version, "Unknown");
    }

    #[test]
    fn test_snapshot_serializes_display_names() {
        let snapshot = PlatformSnapshot {
            os_family: OsFamily::MacOs,
            os_version: "14.5".to_string(),
            cpu_architecture: CpuArchitecture::Arm64,
            runtime_version: "rustc 1.85.0".to_string(),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["os_family"], "macOS");
        assert_eq!(json["cpu_architecture"], "ARM64");
        assert_eq!(json["os_version"], "14.5");
        assert_eq!(json["runtime_version"], "rustc 1.85.0");
    }

    #[test]
    fn test_capabilities_for_posix_families() {
        let linux = Capabilities::detect_for(OsFamily::Linux);
        assert!(linux.is_posix);
        assert!(!linux.windows_broker_supported);

        let macos = Capabilities::detect_for(OsFamily::MacOs);
        assert!(macos.is_posix);
        assert!(!macos.windows_broker_supported);

        let unknown = Capabilities::detect_for(OsFamily::Unknown);
        assert!(!unknown.is_posix);
        assert!(!unknown.windows_broker_supported);
    }

    #[test]
    fn test_capabilities_elevation_matches_probe() {
        assert_eq!(Capabilities::detect().is_elevated_user, is_elevated_user());
    }
}
