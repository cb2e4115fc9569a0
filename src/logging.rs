/// Initialize the logger with the specified verbosity level
///
/// # Arguments
/// * `verbose` - Verbosity level (0=warn, 1=info, 2=debug, 3+=trace)
pub fn setup_logger(verbose: u8) {
    let env_filter = filter_for_verbosity(verbose);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(env_filter))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}

fn filter_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "envprobe=warn",
        1 => "envprobe=info",
        2 => "envprobe=debug",
        _ => "envprobe=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_verbosity() {
        assert_eq!(filter_for_verbosity(0), "envprobe=warn");
        assert_eq!(filter_for_verbosity(1), "envprobe=info");
        assert_eq!(filter_for_verbosity(2), "envprobe=debug");
        assert_eq!(filter_for_verbosity(3), "envprobe=trace");
        assert_eq!(filter_for_verbosity(200), "envprobe=trace");
    }
}
