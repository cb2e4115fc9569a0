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

//! Superuser / administrator detection.

/// Check if the current process runs with superuser or administrator rights.
///
/// On POSIX this is `geteuid() == 0`. On Windows the process token must be a
/// member of the built-in Administrators group. Any failure yields `false`.
pub fn is_elevated_user() -> bool {
    let elevated = platform_is_elevated();
    log::trace!("Elevated user: {elevated}");
    elevated
}

#[cfg(unix)]
fn platform_is_elevated() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(windows)]
fn platform_is_elevated() -> bool {
    windows_admin::is_member_of_administrators().unwrap_or_else(|code| {
        log::debug!("Administrators membership check failed with error {code}");
        false
    })
}

#[cfg(not(any(unix, windows)))]
fn platform_is_elevated() -> bool {
    false
}

#[cfg(windows)]
mod windows_admin {
    use std::ptr;
    use winapi::shared::minwindef::{BOOL, FALSE};
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::securitybaseapi::{AllocateAndInitializeSid, CheckTokenMembership, FreeSid};
    use winapi::um::winnt::{
        DOMAIN_ALIAS_RID_ADMINS, PSID, SECURITY_BUILTIN_DOMAIN_RID, SECURITY_NT_AUTHORITY,
        SID_IDENTIFIER_AUTHORITY,
    };

    /// Owns a SID from `AllocateAndInitializeSid` and frees it on drop.
    struct OwnedSid(PSID);

    impl Drop for OwnedSid {
        fn drop(&mut self) {
            if !self.0.is_null() {
                unsafe {
                    FreeSid(self.0);
                }
            }
        }
    }

    pub fn is_member_of_administrators() -> Result<bool, u32> {
        let mut authority = SID_IDENTIFIER_AUTHORITY {
            Value: SECURITY_NT_AUTHORITY,
        };
        let mut sid: PSID = ptr::null_mut();

        let allocated = unsafe {
            AllocateAndInitializeSid(
                &mut authority,
                2,
                SECURITY_BUILTIN_DOMAIN_RID,
                DOMAIN_ALIAS_RID_ADMINS,
                0,
                0,
                0,
                0,
                0,
                0,
                &mut sid,
            )
        };
        if allocated == FALSE {
            return Err(unsafe { GetLastError() });
        }
        let sid = OwnedSid(sid);

        // A null token handle checks the calling thread's effective token.
        let mut is_member: BOOL = FALSE;
        let checked = unsafe { CheckTokenMembership(ptr::null_mut(), sid.0, &mut is_member) };
        if checked == FALSE {
            return Err(unsafe { GetLastError() });
        }

        Ok(is_member != FALSE)
    }
}
