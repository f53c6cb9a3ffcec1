//! Process-wide application identity: api id, api hash and telemetry service id.
//!
//! ```no_run
//! let identity = app_identity::environment();
//! println!("api id {}", identity.api_id());
//! ```

pub mod config;
mod error;
mod identity;
mod provider;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use identity::{ApplicationConfiguration, RawIdentity};
pub use provider::{
    environment, shared, try_environment, ConfigurationProvider, ProviderState, ENV_PREFIX,
};
