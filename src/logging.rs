//! Tracing subscriber setup.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG` wins; otherwise `default_level` (falling back to `info` if it
/// is not a valid directive).
pub fn build_filter(default_level: &str) -> EnvFilter {
    resolve_filter(std::env::var("RUST_LOG").ok().as_deref(), default_level)
}

fn resolve_filter(rust_log: Option<&str>, default_level: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(default_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
pub fn init_tracing(default_level: &str, json: bool) -> Result<()> {
    let filter = build_filter(default_level);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()?;
    }

    tracing::debug!(json, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_used_without_rust_log() {
        let filter = resolve_filter(None, "feedbackhub=debug");
        assert_eq!(filter.to_string(), "feedbackhub=debug");
    }

    #[test]
    fn test_rust_log_overrides_default_level() {
        let filter = resolve_filter(Some("warn"), "debug");
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_invalid_directives_fall_back() {
        let filter = resolve_filter(Some("feedbackhub=loudest"), "debug");
        assert_eq!(filter.to_string(), "debug");

        let filter = resolve_filter(None, "feedbackhub=loudest");
        assert_eq!(filter.to_string(), "info");
    }
}
