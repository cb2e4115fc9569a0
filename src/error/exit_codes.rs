use crate::error::ProbeError;

pub fn get_exit_code(error: &ProbeError) -> i32 {
    match error {
        ProbeError::ConfigError(_) | ProbeError::InvalidConfig(_) => 2,

        ProbeError::PlatformNotSupported { .. } => 3,

        ProbeError::VersionQuery(_) => 4,

        ProbeError::CommandTimeout { .. } => 124, // Same as coreutils `timeout`

        ProbeError::CommandFailed { .. } => 127, // Standard "command not found" exit code

        _ => 1,
    }
}
