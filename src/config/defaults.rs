// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{MasterKeySettings, StorageSettings};
use crate::consts::{APP_DIR_NAME, DEFAULT_DB_FILE_NAME, DEFAULT_KEY_FILE_NAME};

/// Platform local data dir, or `./data` when there is none
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("data"))
}

pub fn default_key_file() -> PathBuf {
    default_data_dir().join(DEFAULT_KEY_FILE_NAME)
}

pub fn default_db_path() -> PathBuf {
    default_data_dir().join(DEFAULT_DB_FILE_NAME)
}

pub fn default_master_key() -> MasterKeySettings {
    MasterKeySettings {
        key_hex: None,
        key_file: default_key_file(),
    }
}

pub fn default_storage() -> StorageSettings {
    StorageSettings {
        db_path: default_db_path(),
    }
}
