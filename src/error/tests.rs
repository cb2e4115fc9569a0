use crate::error::format::format_error_with_color;
use crate::error::*;
use serial_test::serial;

fn not_supported() -> ProbeError {
    ProbeError::PlatformNotSupported {
        required: "Windows".to_string(),
        actual: "Linux".to_string(),
    }
}

#[test]
fn test_platform_not_supported_message() {
    let error = not_supported();
    assert_eq!(
        error.to_string(),
        "This operation requires Windows, but the current platform is Linux"
    );
}

#[test]
fn test_error_context_platform_not_supported() {
    let error = not_supported();
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.is_some());
    assert!(context.suggestion.unwrap().contains("Windows"));
    assert_eq!(
        context.details,
        Some("Detected OS family: Linux".to_string())
    );
}

#[test]
fn test_error_context_command_failed() {
    let error = ProbeError::CommandFailed {
        program: "uname".to_string(),
        message: "No such file or directory".to_string(),
    };
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.unwrap().contains("'uname'"));
    assert!(context.details.is_none());
}

#[test]
fn test_error_context_timeout_mentions_env_var() {
    let error = ProbeError::CommandTimeout {
        program: "sw_vers".to_string(),
        timeout_secs: 10,
    };
    let context = ErrorContext::new(&error);

    assert!(
        context
            .suggestion
            .unwrap()
            .contains("ENVPROBE_RUNNER__TIMEOUT_SECS")
    );
}

#[test]
fn test_error_context_io_permission_denied() {
    let error = ProbeError::Io(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "denied",
    ));
    let context = ErrorContext::new(&error);

    let suggestion = context.suggestion.unwrap();
    if cfg!(unix) {
        assert!(suggestion.contains("sudo"));
    } else {
        assert!(suggestion.contains("Administrator"));
    }
    assert!(context.details.unwrap().contains("denied"));
}

#[test]
fn test_error_context_with_custom_suggestion() {
    let error = ProbeError::VersionQuery("RtlGetVersion returned 0xC0000001".to_string());
    let context =
        ErrorContext::new(&error).with_suggestion("Fall back to a browser flow.".to_string());

    assert_eq!(
        context.suggestion,
        Some("Fall back to a browser flow.".to_string())
    );
}

#[test]
fn test_error_context_with_custom_details() {
    let error = ProbeError::EntryPathUnavailable;
    let context = ErrorContext::new(&error).with_details("argv0 was empty".to_string());

    assert_eq!(context.details, Some("argv0 was empty".to_string()));
}

#[test]
fn test_format_error_chain() {
    let error = not_supported();
    let formatted = format_error_chain(&error);

    assert!(formatted.starts_with("Error: This operation requires Windows"));
    assert!(formatted.contains("Details: Detected OS family: Linux"));
    assert!(formatted.contains("Suggestion:"));
}

#[test]
#[serial]
fn test_format_error_with_color_follows_override() {
    let error = not_supported();

    colored::control::set_override(true);
    let styled = format_error_with_color(&error);
    colored::control::unset_override();

    assert!(styled.contains("\x1b["));
    assert!(styled.contains("requires Windows"));
    assert!(styled.contains("Detected OS family: Linux"));
}

#[test]
#[serial]
fn test_format_error_with_color_disabled() {
    let error = not_supported();

    colored::control::set_override(false);
    let plain = format_error_with_color(&error);
    colored::control::unset_override();

    assert!(!plain.contains("\x1b["));
    assert!(plain.starts_with("Error: This operation requires Windows"));
    assert!(plain.contains("Suggestions:"));
    assert!(plain.contains("• "));
}

#[test]
fn test_exit_codes() {
    assert_eq!(get_exit_code(&not_supported()), 3);
    assert_eq!(
        get_exit_code(&ProbeError::InvalidConfig("bad".to_string())),
        2
    );
    assert_eq!(
        get_exit_code(&ProbeError::CommandTimeout {
            program: "uname".to_string(),
            timeout_secs: 1,
        }),
        124
    );
    assert_eq!(get_exit_code(&ProbeError::EntryPathUnavailable), 1);
}
