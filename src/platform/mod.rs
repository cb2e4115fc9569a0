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

//! Platform detection utilities for the entire application.
//!
//! Everything here answers "where am I running?": the OS family and its
//! assertions, the OS version, CPU architecture, privilege level and the
//! absolute path of the running executable.

pub mod arch;
pub mod entry;
pub mod family;
pub mod privilege;
pub mod process;
pub mod snapshot;
pub mod version;

pub use arch::{CpuArchitecture, runtime_version};
pub use entry::{native_entry_path, native_entry_path_for, require_native_entry_path};
pub use family::{
    OsFamily, ensure_linux, ensure_macos, ensure_posix, ensure_windows, is_linux, is_macos,
    is_posix, is_windows,
};
pub use privilege::is_elevated_user;
pub use process::{CommandOutput, ProcessRunner, SystemProcessRunner};
pub use snapshot::{Capabilities, PlatformSnapshot, platform_information, platform_information_with};
pub use version::{
    ProductType, RawVersionInfo, UNKNOWN_VERSION, is_windows_broker_supported,
    is_windows_broker_supported_with, os_version, os_version_with, query_raw_version,
};
