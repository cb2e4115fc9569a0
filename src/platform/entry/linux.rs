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

//! Linux entry path fallback chain.
//!
//! The first element of the kernel's NUL-separated argument list (`argv[0]`)
//! is interpreted by an ordered table of strategies. The first strategy that
//! produces a path wins:
//!
//! 1. `argv[0]` is already absolute: returned as-is, without touching the
//!    filesystem.
//! 2. `argv[0]` starts with `./` or contains a `/` after its first character:
//!    joined with the working directory, accepted only if that file exists.
//! 3. `argv[0]` contains no `/`: each non-empty `$PATH` entry is tried in
//!    order and the first existing file wins.
//! 4. The target of the `/proc/self/exe` symlink.
//!
//! All inputs live in [`LinuxEntryContext`] so the chain can be exercised
//! against synthetic command lines.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

const PROC_SELF_CMDLINE: &str = "/proc/self/cmdline";
const PROC_SELF_EXE: &str = "/proc/self/exe";

/// Inputs consulted by the Linux chain.
#[derive(Debug, Clone, Default)]
pub struct LinuxEntryContext {
    /// NUL-separated argument list, normally `/proc/self/cmdline`.
    pub cmdline_file: PathBuf,
    /// Symlink to the running image, normally `/proc/self/exe`.
    pub exe_link: Option<PathBuf>,
    pub current_dir: Option<PathBuf>,
    pub path_var: Option<OsString>,
}

impl LinuxEntryContext {
    /// Context describing the running process.
    pub fn from_process() -> Self {
        Self {
            cmdline_file: PathBuf::from(PROC_SELF_CMDLINE),
            exe_link: Some(PathBuf::from(PROC_SELF_EXE)),
            current_dir: env::current_dir().ok(),
            path_var: env::var_os("PATH"),
        }
    }

    /// First argument of the command line, or empty when unreadable.
    pub fn argv0(&self) -> OsString {
        match fs::read(&self.cmdline_file) {
            Ok(bytes) => {
                let first = bytes.split(|b| *b == 0).next().unwrap_or_default();
                os_string_from_bytes(first.to_vec())
            }
            Err(e) => {
                log::debug!(
                    "Cannot read command line from {}: {e}",
                    self.cmdline_file.display()
                );
                OsString::new()
            }
        }
    }

    /// Run the strategy chain against this context.
    pub fn resolve(&self) -> Option<PathBuf> {
        let argv0 = self.argv0();
        log::trace!("Resolving entry path from argv[0] {argv0:?}");

        LINUX_STRATEGIES.iter().find_map(|strategy| {
            let resolved = (strategy.resolve)(self, &argv0)?;
            log::debug!(
                "Entry path resolved by '{}' strategy: {}",
                strategy.name,
                resolved.display()
            );
            Some(resolved)
        })
    }
}

type StrategyFn = fn(&LinuxEntryContext, &OsStr) -> Option<PathBuf>;

/// One step of the fallback chain.
pub struct LinuxStrategy {
    pub name: &'static str,
    resolve: StrategyFn,
}

impl LinuxStrategy {
    pub fn apply(&self, context: &LinuxEntryContext, argv0: &OsStr) -> Option<PathBuf> {
        (self.resolve)(context, argv0)
    }
}

/// The chain in evaluation order.
pub const LINUX_STRATEGIES: &[LinuxStrategy] = &[
    LinuxStrategy {
        name: "absolute",
        resolve: absolute_argv0,
    },
    LinuxStrategy {
        name: "relative",
        resolve: relative_to_current_dir,
    },
    LinuxStrategy {
        name: "path-search",
        resolve: search_path_var,
    },
    LinuxStrategy {
        name: "exe-link",
        resolve: read_exe_link,
    },
];

pub(super) fn entry_path() -> Option<PathBuf> {
    LinuxEntryContext::from_process().resolve()
}

fn absolute_argv0(_context: &LinuxEntryContext, argv0: &OsStr) -> Option<PathBuf> {
    let path = Path::new(argv0);
    path.is_absolute().then(|| path.to_path_buf())
}

fn relative_to_current_dir(context: &LinuxEntryContext, argv0: &OsStr) -> Option<PathBuf> {
    let bytes = argv0.as_encoded_bytes();
    let is_relative_path =
        bytes.starts_with(b"./") || bytes.iter().position(|b| *b == b'/').is_some_and(|i| i > 0);
    if !is_relative_path {
        return None;
    }

    let current_dir = context.current_dir.as_ref()?;
    // `components()` drops interior `.` segments; `..` is left for the kernel.
    let candidate: PathBuf = current_dir.join(argv0).components().collect();
    candidate.is_file().then_some(candidate)
}

fn search_path_var(context: &LinuxEntryContext, argv0: &OsStr) -> Option<PathBuf> {
    if argv0.is_empty() || argv0.as_encoded_bytes().contains(&b'/') {
        return None;
    }

    let path_var = context.path_var.as_ref()?;
    env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(argv0))
        .find(|candidate| candidate.is_file())
}

fn read_exe_link(context: &LinuxEntryContext, _argv0: &OsStr) -> Option<PathBuf> {
    let link = context.exe_link.as_ref()?;
    match fs::read_link(link) {
        Ok(target) if target.is_absolute() => Some(target),
        Ok(target) => {
            log::debug!(
                "Ignoring non-absolute target {} of {}",
                target.display(),
                link.display()
            );
            None
        }
        Err(e) => {
            log::debug!("Cannot read {}: {e}", link.display());
            None
        }
    }
}

#[cfg(unix)]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    OsString::from(String::from_utf8_lossy(&bytes).into_owned())
}
