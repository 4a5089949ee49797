// src/config/app.rs
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use super::defaults::*;
use crate::consts::{DEFAULT_CONFIG_FILE, ENV_CONFIG, ENV_DB, ENV_MASTER_KEY, ENV_MASTER_KEY_FILE};
use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_master_key")]
    pub master_key: MasterKeySettings,
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Clone, Deserialize)]
pub struct MasterKeySettings {
    /// 64 hex chars; takes precedence over `key_file`
    #[serde(default)]
    pub key_hex: Option<String>,
    #[serde(default = "default_key_file")]
    pub key_file: PathBuf,
}

// key_hex is secret material
impl fmt::Debug for MasterKeySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterKeySettings")
            .field("key_hex", &self.key_hex.as_ref().map(|_| "[REDACTED]"))
            .field("key_file", &self.key_file)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            master_key: default_master_key(),
            storage: default_storage(),
        }
    }
}

impl Config {
    /// Load from `ETV_CONFIG` (or `etv-config.toml`), then apply env overrides.
    ///
    /// A missing file falls back to built-in defaults.
    pub fn load() -> Result<Config> {
        let config_path =
            std::env::var(ENV_CONFIG).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut conf = Self::load_file(Path::new(&config_path))?;
        conf.apply_overrides(|name| std::env::var(name).ok());
        Ok(conf)
    }

    /// Load a TOML file; defaults if it does not exist
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using built-in defaults");
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Config> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `ETV_MASTER_KEY`, `ETV_MASTER_KEY_FILE` and `ETV_DB` from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key_hex) = lookup(ENV_MASTER_KEY) {
            self.master_key.key_hex = Some(key_hex);
        }
        if let Some(key_file) = lookup(ENV_MASTER_KEY_FILE) {
            self.master_key.key_file = PathBuf::from(key_file);
        }
        if let Some(db_path) = lookup(ENV_DB) {
            self.storage.db_path = PathBuf::from(db_path);
        }
    }
}
