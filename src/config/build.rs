//! Values baked into the binary at compile time.

use toml::Value;

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Identity constants captured with `option_env!` when this crate is compiled.
///
/// Set `APP_IDENTITY_API_ID`, `APP_IDENTITY_API_HASH` and optionally
/// `APP_IDENTITY_TELEMETRY_SERVICE_ID` in the build environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildSource {
    api_id: Option<&'static str>,
    api_hash: Option<&'static str>,
    telemetry_service_id: Option<&'static str>,
}

impl BuildSource {
    /// Creates a build source from explicit constants.
    pub const fn new(
        api_id: Option<&'static str>,
        api_hash: Option<&'static str>,
        telemetry_service_id: Option<&'static str>,
    ) -> Self {
        Self {
            api_id,
            api_hash,
            telemetry_service_id,
        }
    }

    /// The constants compiled into this build.
    pub const fn compiled() -> Self {
        Self::new(
            option_env!("APP_IDENTITY_API_ID"),
            option_env!("APP_IDENTITY_API_HASH"),
            option_env!("APP_IDENTITY_TELEMETRY_SERVICE_ID"),
        )
    }
}

impl ConfigSource for BuildSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        let mut entries = Vec::with_capacity(3);

        if let Some(raw) = self.api_id {
            // Left as a string when not numeric so deserialization reports it.
            let value = raw
                .trim()
                .parse::<i64>()
                .map_or_else(|_| Value::String(raw.to_string()), Value::Integer);
            entries.push(ConfigEntry::key("api_id", value));
        }
        if let Some(raw) = self.api_hash {
            entries.push(ConfigEntry::key("api_hash", raw));
        }
        if let Some(raw) = self.telemetry_service_id {
            entries.push(ConfigEntry::key("telemetry_service_id", raw));
        }

        tracing::debug!(count = entries.len(), "read compiled identity constants");
        Ok(entries)
    }
}
