//! Configuration type definitions.

use super::error::ConfigError;
use crate::remote::{DEFAULT_CONNECT_TIMEOUT_SECS, LocalExecutor, RemoteExecutor, SshExecutor};
use crate::types::{ScanMode, ScanTarget, ServerName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Server type handled by the pseudo OS scanner.
pub const SERVER_TYPE_PSEUDO: &str = "pseudo";

/// Main configuration structure for lockscout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Values applied to every server that does not set them itself.
    pub default: ServerConfig,
    /// Servers to scan, keyed by name.
    pub servers: BTreeMap<String, ServerConfig>,
}

/// How commands reach a server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Local,
    Ssh,
}

/// One server entry as written in the config file. Every field is optional so
/// the `[default]` table can fill gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(rename = "type")]
    pub server_type: Option<String>,
    pub transport: Option<Transport>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub key_path: Option<PathBuf>,
    /// SSH target runs a Windows shell.
    pub windows: Option<bool>,
    pub lockfiles: Option<Vec<String>>,
    pub find_lock: Option<bool>,
    pub find_lock_dirs: Option<Vec<String>>,
    /// Overrides the recognized lockfile basenames.
    pub lockfile_names: Option<Vec<String>>,
    pub scan_mode: Option<Vec<ScanMode>>,
    pub connect_timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// Fill unset fields from `defaults`.
    pub fn merged_with(&self, defaults: &ServerConfig) -> ServerConfig {
        macro_rules! pick {
            ($field:ident) => {
                self.$field.clone().or_else(|| defaults.$field.clone())
            };
        }
        ServerConfig {
            server_type: pick!(server_type),
            transport: pick!(transport),
            host: pick!(host),
            port: pick!(port),
            user: pick!(user),
            key_path: pick!(key_path),
            windows: pick!(windows),
            lockfiles: pick!(lockfiles),
            find_lock: pick!(find_lock),
            find_lock_dirs: pick!(find_lock_dirs),
            lockfile_names: pick!(lockfile_names),
            scan_mode: pick!(scan_mode),
            connect_timeout_secs: pick!(connect_timeout_secs),
        }
    }
}

/// A fully resolved server definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub name: ServerName,
    pub server_type: String,
    pub transport: Transport,
    pub host: String,
    pub port: String,
    pub user: String,
    pub key_path: Option<PathBuf>,
    pub windows: bool,
    pub lockfiles: Vec<String>,
    pub find_lock: bool,
    pub find_lock_dirs: Vec<String>,
    pub lockfile_names: Vec<String>,
    pub scan_mode: Vec<ScanMode>,
    pub connect_timeout_secs: u64,
}

impl ServerInfo {
    /// Resolve `raw` against `defaults` and validate it.
    pub fn resolve(
        name: &str,
        raw: &ServerConfig,
        defaults: &ServerConfig,
    ) -> Result<Self, ConfigError> {
        let merged = raw.merged_with(defaults);
        let transport = merged.transport.unwrap_or_default();
        let invalid = |message: &str| ConfigError::InvalidServer {
            name: name.to_string(),
            message: message.to_string(),
        };

        let host = match (transport, merged.host) {
            (Transport::Ssh, None) => return Err(invalid("ssh transport requires host")),
            (_, host) => host.unwrap_or_else(|| "localhost".to_string()),
        };
        let user = match (transport, merged.user) {
            (Transport::Ssh, None) => return Err(invalid("ssh transport requires user")),
            (_, user) => user.unwrap_or_default(),
        };

        Ok(Self {
            name: ServerName::new(name),
            server_type: merged
                .server_type
                .unwrap_or_else(|| SERVER_TYPE_PSEUDO.to_string()),
            transport,
            host,
            port: merged.port.unwrap_or_else(|| "22".to_string()),
            user,
            key_path: merged.key_path,
            windows: merged.windows.unwrap_or(false),
            lockfiles: merged.lockfiles.unwrap_or_default(),
            find_lock: merged.find_lock.unwrap_or(false),
            find_lock_dirs: merged.find_lock_dirs.unwrap_or_default(),
            lockfile_names: merged
                .lockfile_names
                .unwrap_or_else(crate::discovery::default_lockfile_names),
            scan_mode: merged.scan_mode.unwrap_or_else(|| vec![ScanMode::Fast]),
            connect_timeout_secs: merged
                .connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        })
    }

    /// The discovery view of this server.
    pub fn scan_target(&self) -> ScanTarget {
        ScanTarget::new()
            .with_lockfiles(self.lockfiles.clone())
            .with_find_lock(self.find_lock)
            .with_find_lock_dirs(self.find_lock_dirs.clone())
            .with_lockfile_names(self.lockfile_names.clone())
            .with_scan_modes(&self.scan_mode)
    }

    /// Command-execution channel for this server.
    pub fn executor(&self) -> Box<dyn RemoteExecutor> {
        match self.transport {
            Transport::Local => Box::new(LocalExecutor::new()),
            Transport::Ssh => Box::new(
                SshExecutor::new(&self.host, &self.user)
                    .with_port(&self.port)
                    .with_key_path(self.key_path.clone())
                    .with_connect_timeout(self.connect_timeout_secs)
                    .with_windows(self.windows),
            ),
        }
    }
}

impl Config {
    /// All servers, resolved against `[default]`, in name order.
    pub fn servers(&self) -> Result<Vec<ServerInfo>, ConfigError> {
        self.servers
            .iter()
            .map(|(name, raw)| ServerInfo::resolve(name, raw, &self.default))
            .collect()
    }

    /// The named servers, or all of them when `names` is empty.
    pub fn select_servers(&self, names: &[String]) -> Result<Vec<ServerInfo>, ConfigError> {
        if names.is_empty() {
            return self.servers();
        }
        names
            .iter()
            .map(|name| {
                let raw = self
                    .servers
                    .get(name)
                    .ok_or_else(|| ConfigError::UnknownServer(name.clone()))?;
                ServerInfo::resolve(name, raw, &self.default)
            })
            .collect()
    }
}
