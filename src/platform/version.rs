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

//! OS version probing and version-gated capability checks.

use crate::error::Result;
use crate::platform::family::OsFamily;
use crate::platform::process::{ProcessRunner, SystemProcessRunner};

pub const UNKNOWN_VERSION: &str = "Unknown";

/// Minimum Windows 10 build with broker support on client SKUs.
const BROKER_MIN_WORKSTATION_BUILD: u32 = 15063;
/// Minimum build with broker support on Windows Server (1809).
const BROKER_MIN_SERVER_BUILD: u32 = 17763;
const BROKER_MIN_MAJOR_VERSION: u32 = 10;

const MACOS_VERSION_COMMAND: (&str, &[&str]) = ("sw_vers", &["-productVersion"]);
const LINUX_VERSION_COMMAND: (&str, &[&str]) = ("uname", &["-a"]);

/// Windows product type reported alongside the version numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductType {
    Workstation,
    DomainController,
    Server,
    Unknown(u8),
}

impl ProductType {
    /// Map the raw `wProductType` value (`VER_NT_*`).
    pub fn from_raw(value: u8) -> Self {
        match value {
            1 => ProductType::Workstation,
            2 => ProductType::DomainController,
            3 => ProductType::Server,
            other => ProductType::Unknown(other),
        }
    }
}

/// Raw Windows version structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawVersionInfo {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub product_type: ProductType,
}

impl RawVersionInfo {
    /// Whether this Windows version can host the native authentication broker.
    ///
    /// Client SKUs need build 15063; server and domain controller SKUs need
    /// build 17763. Unrecognized product types are held to the server bar.
    pub fn supports_broker(&self) -> bool {
        if self.major < BROKER_MIN_MAJOR_VERSION {
            return false;
        }

        let min_build = match self.product_type {
            ProductType::Workstation => BROKER_MIN_WORKSTATION_BUILD,
            ProductType::DomainController | ProductType::Server | ProductType::Unknown(_) => {
                BROKER_MIN_SERVER_BUILD
            }
        };

        self.build >= min_build
    }

    /// `"{major}.{minor} (build {build})"`
    pub fn display_version(&self) -> String {
        format!("{}.{} (build {})", self.major, self.minor, self.build)
    }
}

/// Query the raw Windows version structure.
///
/// Fails with [`crate::error::ProbeError::PlatformNotSupported`] anywhere but Windows.
pub fn query_raw_version() -> Result<RawVersionInfo> {
    OsFamily::current().ensure_windows()?;
    native::query_raw_version()
}

/// Whether the Windows authentication broker may be used on this machine.
pub fn is_windows_broker_supported() -> bool {
    is_windows_broker_supported_with(OsFamily::current(), query_raw_version)
}

/// Broker decision for a given family; `query` only runs on Windows.
pub fn is_windows_broker_supported_with<F>(family: OsFamily, query: F) -> bool
where
    F: FnOnce() -> Result<RawVersionInfo>,
{
    if !family.is_windows() {
        return false;
    }

    match query() {
        Ok(info) => {
            let supported = info.supports_broker();
            log::debug!(
                "Windows {} ({:?}) broker support: {supported}",
                info.display_version(),
                info.product_type
            );
            supported
        }
        Err(e) => {
            log::debug!("Unable to query Windows version for broker check: {e}");
            false
        }
    }
}

/// Human-readable OS version of the running system, `"Unknown"` on failure.
pub fn os_version() -> String {
    os_version_with(OsFamily::current(), &SystemProcessRunner::new())
}

/// OS version for `family`, running external commands through `runner`.
pub fn os_version_with(family: OsFamily, runner: &dyn ProcessRunner) -> String {
    let version = match family {
        OsFamily::Windows => query_raw_version()
            .inspect_err(|e| log::debug!("Windows version query failed: {e}"))
            .ok()
            .map(|info| info.display_version()),
        OsFamily::MacOs => run_version_command(runner, MACOS_VERSION_COMMAND),
        OsFamily::Linux => run_version_command(runner, LINUX_VERSION_COMMAND),
        OsFamily::Unknown => None,
    };

    version.unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}

fn run_version_command(
    runner: &dyn ProcessRunner,
    (program, args): (&str, &[&str]),
) -> Option<String> {
    let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();

    let output = match runner.run(program, &args) {
        Ok(output) => output,
        Err(e) => {
            log::debug!("Version command {program} failed: {e}");
            return None;
        }
    };

    if !output.success() {
        log::debug!(
            "Version command {program} exited with {:?}",
            output.exit_code
        );
        return None;
    }

    let version = output.stdout.trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

#[cfg(windows)]
mod native {
    use super::{ProductType, RawVersionInfo};
    use crate::error::{ProbeError, Result};
    use winapi::shared::ntdef::NTSTATUS;
    use winapi::um::winnt::OSVERSIONINFOEXW;

    // RtlGetVersion reports the real version regardless of the manifest,
    // unlike GetVersionExW.
    #[link(name = "ntdll")]
    unsafe extern "system" {
        fn RtlGetVersion(info: *mut OSVERSIONINFOEXW) -> NTSTATUS;
    }

    pub fn query_raw_version() -> Result<RawVersionInfo> {
        let mut info: OSVERSIONINFOEXW = unsafe { std::mem::zeroed() };
        info.dwOSVersionInfoSize = std::mem::size_of::<OSVERSIONINFOEXW>() as u32;

        let status = unsafe { RtlGetVersion(&mut info) };
        if status != 0 {
            return Err(ProbeError::VersionQuery(format!(
                "RtlGetVersion returned {status:#x}"
            )));
        }

        Ok(RawVersionInfo {
            major: info.dwMajorVersion,
            minor: info.dwMinorVersion,
            build: info.dwBuildNumber,
            product_type: ProductType::from_raw(info.wProductType),
        })
    }
}

#[cfg(not(windows))]
mod native {
    use super::RawVersionInfo;
    use crate::error::{ProbeError, Result};

    pub fn query_raw_version() -> Result<RawVersionInfo> {
        Err(ProbeError::VersionQuery(
            "RtlGetVersion is only available on Windows".to_string(),
        ))
    }
}
