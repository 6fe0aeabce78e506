//! Logging setup for the serverless functions.

use tracing_subscriber::EnvFilter;

/// Normalized `LOG_LEVEL`. Unknown or missing levels fall back to `info`.
pub fn level_name(level: Option<&str>) -> &'static str {
    match level.map(|l| l.trim().to_lowercase()).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => "info",
    }
}

/// Install the global subscriber. Later calls in a warm function are no-ops.
pub fn init() {
    let level = level_name(std::env::var("LOG_LEVEL").ok().as_deref());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(true)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(level_name(Some("DEBUG")), "debug");
        assert_eq!(level_name(Some("warn ")), "warn");
        assert_eq!(level_name(Some("verbose")), "info");
        assert_eq!(level_name(None), "info");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        init();
    }
}
