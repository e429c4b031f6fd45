//! Structured logging.
//!
//! The library only emits `tracing` events. Applications that want them on
//! stdout call [`init_logging`] once at startup.
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level when set
//! - JSON format for production, human-readable format for development
//! - Private keys never reach a log field

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ObservabilityConfig;

/// Build the filter: `RUST_LOG` if present, else `appchain_client=<level>`.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("appchain_client={}", config.log_level)))
}

/// Install the global subscriber.
///
/// Returns an error if a subscriber is already installed.
pub fn init_logging(
    config: &ObservabilityConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = ObservabilityConfig::default();
        let first = init_logging(&config);
        // Another test may have installed a subscriber first.
        if first.is_ok() {
            assert!(init_logging(&config).is_err());
        }
    }
}
