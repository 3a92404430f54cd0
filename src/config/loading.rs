//! Configuration loading functions.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::types::Config;

/// Config file names looked up in the working directory, in order.
pub const LOCAL_CONFIG_FILES: &[&str] = &[
    "lockscout.toml",
    "lockscout.yaml",
    "lockscout.yml",
    "lockscout.json",
];

impl Config {
    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseYaml {
                path: path.display().to_string(),
                source: e,
            }),
            "json" => serde_json::from_str(&content).map_err(|e| ConfigError::ParseJson {
                path: path.display().to_string(),
                source: e,
            }),
            "toml" => toml::from_str(&content).map_err(|e| ConfigError::ParseToml {
                path: path.display().to_string(),
                source: e,
            }),
            _ => Err(ConfigError::UnsupportedFormat(
                path.display().to_string(),
                ext,
            )),
        }
    }

    /// Find the config file to use.
    ///
    /// Search order:
    /// 1. `explicit` (from `--config`)
    /// 2. `lockscout.{toml,yaml,yml,json}` in `cwd`
    /// 3. `<config_dir>/lockscout/config.toml`
    pub fn locate(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Some(path) = LOCAL_CONFIG_FILES
            .iter()
            .map(|name| cwd.join(name))
            .find(|path| path.exists())
        {
            return Some(path);
        }

        dirs::config_dir()
            .map(|dir| dir.join("lockscout").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Locate and parse the config file.
    ///
    /// Unlike a missing optional file, an explicit or discovered file that
    /// fails to parse is an error.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<(Self, PathBuf), ConfigError> {
        let path = Self::locate(explicit, cwd).ok_or(ConfigError::NotFound)?;
        let config = Self::from_file(&path)?;
        Ok((config, path))
    }
}
