//! Logging setup for the CLI.
//!
//! Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
//! takes precedence when set; otherwise the filter is derived from the
//! `-v`/`-q` flags.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber. Call once at startup.
pub fn init_logging(verbosity: u8, quiet: bool) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(filter_directive(verbosity, quiet))
    };

    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Map the verbosity flags to a filter directive.
/// 0 = info, 1 = debug, 2+ = trace; quiet wins and shows errors only.
fn filter_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_from_verbosity() {
        assert_eq!(filter_directive(0, false), "info");
        assert_eq!(filter_directive(1, false), "debug");
        assert_eq!(filter_directive(2, false), "trace");
        assert_eq!(filter_directive(10, false), "trace");
    }

    #[test]
    fn test_quiet_overrides_verbosity() {
        assert_eq!(filter_directive(0, true), "error");
        assert_eq!(filter_directive(3, true), "error");
    }
}
