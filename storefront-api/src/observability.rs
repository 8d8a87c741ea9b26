//! Structured logging

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the JSON log subscriber
///
/// `service.log_level` accepts a plain level or any `EnvFilter` directive; an
/// unreadable directive falls back to `info`. Returns `false` when a global
/// subscriber was already installed.
pub fn init_tracing(config: &Config) -> bool {
    let filter =
        EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Tracing initialized for service: {}", config.service.name);
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        let mut config = Config::default();
        config.service.log_level = "storefront_api=debug,tower_http=info".to_string();
        init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
