// src/core/mod.rs
pub mod crypto;
pub mod envelope;
pub mod key;
pub mod master_key;
pub mod record;
pub mod validate;

pub use crypto::{open, seal, Sealed};
pub use envelope::{canonical_json, EnvelopeCodec};
pub use key::{generate_key, generate_record_id, MasterKey};
pub use master_key::{load_master_key, MasterKeyProvider};
pub use record::{DecodedRecord, RecordSummary, SecureRecord};
pub use validate::validate;

pub type Result<T> = std::result::Result<T, crate::error::CoreError>;
