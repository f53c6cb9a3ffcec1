use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("required identity file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read identity file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse identity file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("environment variable '{0}' is not valid unicode")]
    NonUnicodeEnv(String),

    #[error("failed to deserialize identity values: {0}")]
    DeserializeError(#[from] toml::de::Error),
}
