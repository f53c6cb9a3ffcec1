//! Exactly-once construction of the application identity.

use once_cell::sync::{Lazy, OnceCell};

use crate::config::Config;
use crate::identity::{ApplicationConfiguration, RawIdentity};
use crate::Error;

/// Environment prefix read by the process-wide provider, e.g. `APP_IDENTITY__API_ID`.
pub const ENV_PREFIX: &str = "APP_IDENTITY";

static SHARED: Lazy<ConfigurationProvider> = Lazy::new(|| {
    ConfigurationProvider::new(
        Config::builder()
            .with_build_constants()
            .with_env(ENV_PREFIX, "__"),
    )
});

/// Lifecycle of a provider as seen from outside the initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderState {
    Uninitialized,
    Ready,
    /// Construction failed; the failure is kept and never retried.
    Failed,
}

/// Holds one [`ApplicationConfiguration`], built from its sources on first access.
///
/// Concurrent first callers block until the single constructing caller
/// publishes the outcome. The outcome, success or failure, is kept for the
/// lifetime of the provider and the sources are never read again.
#[derive(Debug)]
pub struct ConfigurationProvider {
    loader: Config,
    outcome: OnceCell<Result<ApplicationConfiguration, Error>>,
}

impl ConfigurationProvider {
    /// Creates a provider over `loader`. Nothing is read until first access.
    pub fn new(loader: Config) -> Self {
        Self {
            loader,
            outcome: OnceCell::new(),
        }
    }

    /// Returns the identity, constructing it on the first call.
    pub fn get_instance(&self) -> Result<&ApplicationConfiguration, &Error> {
        self.outcome.get_or_init(|| self.construct()).as_ref()
    }

    /// Like [`get_instance`](Self::get_instance), but treats failure as fatal.
    ///
    /// # Panics
    ///
    /// Panics if the identity could not be constructed.
    pub fn instance(&self) -> &ApplicationConfiguration {
        match self.get_instance() {
            Ok(identity) => identity,
            Err(err) => {
                tracing::error!(error = %err, "application identity unavailable");
                panic!("application identity unavailable: {err}");
            }
        }
    }

    /// Where the provider is in its lifecycle. Never blocks.
    pub fn state(&self) -> ProviderState {
        match self.outcome.get() {
            None => ProviderState::Uninitialized,
            Some(Ok(_)) => ProviderState::Ready,
            Some(Err(_)) => ProviderState::Failed,
        }
    }

    /// Shorthand for `instance().api_id()`.
    pub fn api_id(&self) -> i32 {
        self.instance().api_id()
    }

    /// Shorthand for `instance().api_hash()`.
    pub fn api_hash(&self) -> &str {
        self.instance().api_hash()
    }

    /// Shorthand for `instance().telemetry_service_id()`.
    pub fn telemetry_service_id(&self) -> &str {
        self.instance().telemetry_service_id()
    }

    fn construct(&self) -> Result<ApplicationConfiguration, Error> {
        let raw: RawIdentity = self.loader.load()?;
        let identity = ApplicationConfiguration::from_raw(raw)?;

        tracing::info!(
            api_id = identity.api_id(),
            telemetry = !identity.telemetry_service_id().is_empty(),
            "application identity ready"
        );
        Ok(identity)
    }
}

/// The process-wide provider.
///
/// Reads compiled constants, then `APP_IDENTITY__*` environment overrides.
pub fn shared() -> &'static ConfigurationProvider {
    &SHARED
}

/// The process-wide identity, or the error that prevented building it.
pub fn try_environment() -> Result<&'static ApplicationConfiguration, &'static Error> {
    shared().get_instance()
}

/// The process-wide identity.
///
/// # Panics
///
/// Panics if the identity could not be constructed; the process cannot run
/// without it.
pub fn environment() -> &'static ApplicationConfiguration {
    shared().instance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildSource;

    fn provider(source: BuildSource) -> ConfigurationProvider {
        ConfigurationProvider::new(Config::builder().with_source(source))
    }

    #[test]
    fn test_starts_uninitialized() {
        let provider = provider(BuildSource::new(Some("1"), Some("h"), None));
        assert_eq!(provider.state(), ProviderState::Uninitialized);

        provider.get_instance().unwrap();
        assert_eq!(provider.state(), ProviderState::Ready);
    }

    #[test]
    fn test_accessors_delegate_to_instance() {
        let provider = provider(BuildSource::new(Some("12345"), Some("a1b2c3d4e5"), Some("hockey-xyz")));

        assert_eq!(provider.api_id(), 12345);
        assert_eq!(provider.api_hash(), "a1b2c3d4e5");
        assert_eq!(provider.telemetry_service_id(), "hockey-xyz");
    }

    #[test]
    fn test_missing_hash_fails() {
        let provider = provider(BuildSource::new(Some("1"), None, None));

        let err = provider.get_instance().unwrap_err();
        assert!(matches!(err, Error::ConfigurationUnavailable { .. }));
        assert_eq!(provider.state(), ProviderState::Failed);
    }

    #[test]
    fn test_bad_api_id_fails_as_config_error() {
        let provider = provider(BuildSource::new(Some("99999999999"), Some("h"), None));

        let err = provider.get_instance().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    #[should_panic(expected = "application identity unavailable")]
    fn test_instance_panics_when_unavailable() {
        let provider = provider(BuildSource::default());
        let _ = provider.instance();
    }
}
