//! Tracing subscriber initialisation.

use std::io;

use tracing_subscriber::{
    EnvFilter, fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use super::config::{LogFormat, StoreConfig};

/// Install the global subscriber. Logs go to stderr; stdout is kept for
/// storefront output.
pub(crate) fn init(config: &StoreConfig) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(build_env_filter(config));

    match config.log_format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init(),
    }
}

fn build_env_filter(config: &StoreConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}
