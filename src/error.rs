use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for application identity.
///
/// Every variant means the identity could not be built; none is recoverable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("application configuration unavailable, missing: {}", missing.join(", "))]
    ConfigurationUnavailable { missing: Vec<&'static str> },
}
