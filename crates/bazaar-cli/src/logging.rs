//! Tracing subscriber setup.
//!
//! Logs go to stderr so that stdout carries only command output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingSection};

const FALLBACK_FILTER: &str = "bazaar_cli=info,bazaar_facets=info";

/// Picks the filter: `RUST_LOG` first, then the configured level.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// Installs the global subscriber. Call once, from `main`.
pub fn init_tracing(logging: &LoggingSection) {
    let registry = tracing_subscriber::registry().with(env_filter(&logging.level));

    match logging.format {
        LogFormat::Json => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
