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

use std::path::PathBuf;

#[cfg(target_os = "macos")]
pub(super) fn entry_path() -> Option<PathBuf> {
    use std::ffi::{CStr, OsStr};
    use std::os::unix::ffi::OsStrExt;

    unsafe extern "C" {
        fn _NSGetExecutablePath(buf: *mut libc::c_char, bufsize: *mut u32) -> libc::c_int;
    }

    // The first call only reports the required size and returns -1 for it.
    let mut size: u32 = 0;
    unsafe {
        _NSGetExecutablePath(std::ptr::null_mut(), &mut size);
    }
    if size == 0 {
        log::debug!("_NSGetExecutablePath reported a zero buffer size");
        return None;
    }

    let mut buffer = vec![0 as libc::c_char; size as usize];
    let status = unsafe { _NSGetExecutablePath(buffer.as_mut_ptr(), &mut size) };
    if status != 0 {
        log::debug!("_NSGetExecutablePath failed with status {status}");
        return None;
    }

    // SAFETY: on success the buffer holds a NUL-terminated path.
    let path = unsafe { CStr::from_ptr(buffer.as_ptr()) };
    let path = PathBuf::from(OsStr::from_bytes(path.to_bytes()));
    path.is_absolute().then_some(path)
}

#[cfg(not(target_os = "macos"))]
pub(super) fn entry_path() -> Option<PathBuf> {
    log::debug!("_NSGetExecutablePath is only available on macOS");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "macos")]
    #[test]
    fn test_returns_running_binary() {
        let path = entry_path().expect("executable path on macOS");
        assert!(path.is_absolute());
        assert!(path.exists());
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_unavailable_off_macos() {
        assert_eq!(entry_path(), None);
    }
}
