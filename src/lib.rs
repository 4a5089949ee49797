// src/lib.rs
//! encrypted-txn-vault: envelope-encrypted storage for JSON transactions
//!
//! Features:
//! - AES-256-GCM with a fresh DEK per record
//! - DEKs wrapped under a single master key (config value or key file)
//! - Strict record validation before any decrypt attempt
//! - SQLite record store + JSON export

pub mod algo;
pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod db;
pub mod export;
pub mod vault;

pub mod error;

// Re-export everything users need at the crate root
pub use algo::EncryptionAlgorithm;
pub use config::Config;
pub use crate::core::{
    validate, DecodedRecord, EnvelopeCodec, MasterKey, MasterKeyProvider, RecordSummary,
    SecureRecord,
};
pub use error::{CipherError, CoreError, DecryptionError, MasterKeyError, ValidationError};
pub use export::export_records_to_json;
pub use vault::TxnVault;
