// src/consts.rs
//! Shared constants: cipher parameters, record tags and defaults

/// AES-256 key size (master key and per-record DEK)
pub const KEY_LEN: usize = 32;

/// AES-GCM nonce size (96 bits)
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag size
pub const TAG_LEN: usize = 16;

/// Random bytes behind a record id (hex-encoded → 32 chars)
pub const RECORD_ID_LEN: usize = 16;

/// The single supported algorithm tag written into every record
pub const SUPPORTED_ALG: &str = "AES-256-GCM";

/// The single supported master-key version
pub const SUPPORTED_MK_VERSION: i64 = 1;

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "etv-config.toml";

/// Directory name used under the platform data dir
pub const APP_DIR_NAME: &str = "encrypted-txn-vault";

pub const DEFAULT_KEY_FILE_NAME: &str = "master.key";
pub const DEFAULT_DB_FILE_NAME: &str = "records.db";

/// Environment overrides
pub const ENV_CONFIG: &str = "ETV_CONFIG";
pub const ENV_MASTER_KEY: &str = "ETV_MASTER_KEY";
pub const ENV_MASTER_KEY_FILE: &str = "ETV_MASTER_KEY_FILE";
pub const ENV_DB: &str = "ETV_DB";

/// Export format identifier written into JSON backups
pub const EXPORT_FORMAT: &str = "encrypted-txn-vault-v1";
