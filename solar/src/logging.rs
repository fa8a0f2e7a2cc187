//! Stderr diagnostics for the `solar` CLI.
//!
//! Listings and summaries are written to stdout as JSON, so every tracing
//! event goes to stderr where it cannot corrupt piped output. What shows up:
//!
//! - `info`: the store being seeded, with its seed count.
//! - `debug`: each completed store operation with its id, index or record count.
//! - `warn`: simulated network failures, tagged with the failing operation.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directive used when `RUST_LOG` is unset or unparsable.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber, filtered by `RUST_LOG`.
///
/// ```bash
/// RUST_LOG=solar=debug solar list --status maintenance
/// ```
pub fn init() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(filter_for(directives.as_deref()))
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn filter_for(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_or_blank_env_falls_back_to_warn() {
        assert_eq!(filter_for(None).to_string(), "warn");
        assert_eq!(filter_for(Some("  ")).to_string(), "warn");
    }

    #[test]
    fn env_directives_are_honored() {
        assert_eq!(
            filter_for(Some("solar=debug")).to_string(),
            "solar=debug"
        );
    }

    #[test]
    fn unparsable_env_falls_back_to_warn() {
        assert_eq!(filter_for(Some("solar=notalevel")).to_string(), "warn");
    }
}
