use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{filter}'")]
    Filter {
        filter: String,
        #[source]
        source: ParseError,
    },
    #[error("global tracing subscriber already installed")]
    AlreadyInitialized(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Install the global tracing subscriber for the dashboard service.
///
/// The configured level is the default directive; `RUST_LOG`, when set,
/// takes precedence so operators can raise verbosity per component without
/// touching the service config.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let directives = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(overrides) => overrides,
        Err(_) => config.log_level.clone(),
    };
    let filter = EnvFilter::try_new(&directives).map_err(|source| TelemetryError::Filter {
        filter: directives,
        source,
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_filter() {
        std::env::remove_var(EnvFilter::DEFAULT_ENV);
        let config = TelemetryConfig {
            log_level: "info=oops=extra".to_owned(),
        };

        let err = init(&config).expect_err("malformed filter rejected");
        assert!(matches!(err, TelemetryError::Filter { .. }));
    }
}
