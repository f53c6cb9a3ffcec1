use std::path::Path;

use serde::de::DeserializeOwned;

use super::build::BuildSource;
use super::env::EnvSource;
use super::file::FileSource;
use super::source::{merge_at_path, ConfigSource};
use super::ConfigError;

/// Layered loader over any number of [`ConfigSource`]s.
///
/// Sources are merged in registration order, with later sources overriding
/// earlier ones. Nested tables are merged recursively; other values are
/// replaced entirely.
///
/// ## Example
///
/// ```no_run
/// use app_identity::{Config, RawIdentity};
///
/// let raw: RawIdentity = Config::builder()
///     .with_build_constants()
///     .with_file("identity.toml", false)
///     .with_env("APP_IDENTITY", "__")
///     .load()?;
/// # Ok::<(), app_identity::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct Config {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl Config {
    /// Creates an empty loader.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds any source. Later sources override earlier ones.
    #[must_use]
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Adds a TOML file. A missing file fails the load only if `required`.
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds `PREFIX<separator>KEY` environment variables.
    #[must_use]
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Adds the constants compiled into this build.
    #[must_use]
    pub fn with_build_constants(self) -> Self {
        self.with_source(BuildSource::compiled())
    }

    /// Reads every source once, merges, and deserializes into `T`.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let mut merged = toml::Table::new();

        for source in &self.sources {
            for entry in source.entries()? {
                merge_at_path(&mut merged, &entry.path, entry.value);
            }
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(ConfigError::DeserializeError)
    }
}
