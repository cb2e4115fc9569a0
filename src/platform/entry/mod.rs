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

//! Native entry path resolution.
//!
//! Recovers the absolute path of the executable the OS actually launched,
//! regardless of whether the process was started through an absolute path,
//! a relative path, a `$PATH` lookup or a symlink. The result is advisory:
//! every failure is reported as `None`, and the file may disappear between
//! resolution and use.
//!
//! The strategy is chosen at run time from the [`OsFamily`]:
//!
//! - **Windows**: first element of the OS command line, split with the shell
//!   tokenization rules, accepted only when already absolute.
//! - **macOS**: `_NSGetExecutablePath`.
//! - **Linux**: the ordered fallback chain in [`linux`].

pub mod linux;
mod macos;
mod windows;

use crate::error::{ProbeError, Result};
use crate::platform::family::OsFamily;
use std::path::PathBuf;

pub use linux::{LINUX_STRATEGIES, LinuxEntryContext, LinuxStrategy};

/// Absolute path of the running executable, if it can be determined.
pub fn native_entry_path() -> Option<PathBuf> {
    native_entry_path_for(OsFamily::current())
}

/// Resolve the entry path with the strategy for `family`.
pub fn native_entry_path_for(family: OsFamily) -> Option<PathBuf> {
    let path = match family {
        OsFamily::Windows => windows::entry_path(),
        OsFamily::MacOs => macos::entry_path(),
        OsFamily::Linux => linux::entry_path(),
        OsFamily::Unknown => None,
    };

    match &path {
        Some(path) => log::debug!("Native entry path ({family}): {}", path.display()),
        None => log::debug!("Native entry path ({family}) could not be determined"),
    }
    path
}

/// Like [`native_entry_path`], for callers that need a hard answer.
pub fn require_native_entry_path() -> Result<PathBuf> {
    native_entry_path().ok_or(ProbeError::EntryPathUnavailable)
}
