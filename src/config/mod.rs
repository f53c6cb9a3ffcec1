//! Build-configuration sources and the layered loader over them.

mod build;
mod builder;
mod env;
mod error;
mod file;
mod source;

pub use build::BuildSource;
pub use builder::Config;
pub use env::EnvSource;
pub use error::ConfigError;
pub use file::FileSource;
pub use source::{ConfigEntry, ConfigSource};
