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

#[cfg(any(windows, test))]
use std::ffi::OsString;
use std::path::PathBuf;

/// Accept the first command line argument only when it is already absolute.
#[cfg(any(windows, test))]
fn accept_argv0(argv0: OsString) -> Option<PathBuf> {
    let path = PathBuf::from(argv0);
    if path.is_absolute() {
        Some(path)
    } else {
        log::debug!(
            "First command line argument {} is not absolute",
            path.display()
        );
        None
    }
}

#[cfg(windows)]
pub(super) fn entry_path() -> Option<PathBuf> {
    use std::os::windows::ffi::OsStringExt;
    use winapi::shared::ntdef::LPWSTR;
    use winapi::um::processenv::GetCommandLineW;
    use winapi::um::shellapi::CommandLineToArgvW;
    use winapi::um::winbase::LocalFree;

    /// Frees the array returned by `CommandLineToArgvW`.
    struct ArgvGuard(*mut LPWSTR);

    impl Drop for ArgvGuard {
        fn drop(&mut self) {
            unsafe {
                LocalFree(self.0.cast());
            }
        }
    }

    let command_line = unsafe { GetCommandLineW() };
    if command_line.is_null() {
        return None;
    }

    let mut argc: i32 = 0;
    let argv = unsafe { CommandLineToArgvW(command_line, &mut argc) };
    if argv.is_null() {
        log::debug!("CommandLineToArgvW failed");
        return None;
    }
    let argv = ArgvGuard(argv);
    if argc < 1 {
        return None;
    }

    // SAFETY: argv holds `argc` NUL-terminated wide strings while the guard lives.
    let first = unsafe {
        let arg = *argv.0;
        let len = (0..).take_while(|&i| *arg.add(i) != 0).count();
        std::slice::from_raw_parts(arg, len)
    };
    accept_argv0(OsString::from_wide(first))
}

#[cfg(not(windows))]
pub(super) fn entry_path() -> Option<PathBuf> {
    log::debug!("Windows command line parsing is only available on Windows");
    None
}
