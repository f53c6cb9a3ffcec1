//! Environment-variable configuration source.

use toml::Value;

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Reads `PREFIX<sep>KEY` variables from the process environment.
///
/// `APP_IDENTITY__API_ID=12345` with prefix `APP_IDENTITY` and separator `__`
/// yields `api_id = "12345"`. Further separators nest into tables. Values are
/// passed on as strings; typing is left to deserialization.
///
/// Variables whose names are not valid Unicode are skipped. A non-Unicode
/// value under the prefix is an error.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
}

impl EnvSource {
    /// Creates a new environment source.
    ///
    /// # Panics
    ///
    /// Panics if `separator` is empty.
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
        }
    }
}

impl ConfigSource for EnvSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        let leading = format!("{}{}", self.prefix, self.separator);
        let mut entries = Vec::new();

        for (key, value) in std::env::vars_os() {
            let Some(key) = key.to_str() else {
                continue;
            };
            let Some(rest) = key.strip_prefix(&leading) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }

            let value = value
                .into_string()
                .map_err(|_| ConfigError::NonUnicodeEnv(key.to_string()))?;
            let path = rest
                .split(&self.separator)
                .map(str::to_lowercase)
                .collect();
            entries.push(ConfigEntry::at_path(path, Value::String(value)));
        }

        tracing::debug!(prefix = %self.prefix, count = entries.len(), "read environment source");
        Ok(entries)
    }
}
