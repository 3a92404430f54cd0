//! Configuration file support.
//!
//! Server definitions are read from YAML, JSON or TOML. Each server entry is
//! merged with the optional `[default]` table into a [`ServerInfo`].

mod error;
mod loading;
mod types;

pub use error::ConfigError;
pub use loading::LOCAL_CONFIG_FILES;
pub use types::{Config, SERVER_TYPE_PSEUDO, ServerConfig, ServerInfo, Transport};
