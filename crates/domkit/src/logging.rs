//! Logging setup
//!
//! `RUST_LOG` wins over the filter passed in.

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber. Returns false if one was already set.
pub fn init(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok()
}
