// src/error.rs
//! Public error types for the entire crate

use std::path::PathBuf;

use thiserror::Error;

/// Structural problem in a record, detected before any decrypt attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is not valid hex")]
    InvalidHex { field: &'static str },

    #[error("{field} must decode to {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("unsupported algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    #[error("unsupported master key version: {0}")]
    UnsupportedVersion(i64),
}

impl ValidationError {
    /// The record field that failed, when the failure is field-specific
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidHex { field }
            | ValidationError::InvalidLength { field, .. }
            | ValidationError::Empty { field } => field,
            ValidationError::UnsupportedAlgorithm(_) => "alg",
            ValidationError::UnsupportedVersion(_) => "mk_version",
        }
    }
}

/// Authentication or post-decryption consistency failure.
///
/// A tag mismatch and a payload that decrypts to non-JSON are the same
/// condition to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("decryption failed: {field} could not be authenticated")]
pub struct DecryptionError {
    pub field: &'static str,
}

/// Raw AES-256-GCM failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    #[error("encryption failed")]
    EncryptionFailed,

    /// Wrong key, ciphertext, nonce or tag. Deliberately indistinguishable.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Where a master key was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    ConfigValue,
    KeyFile(PathBuf),
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::ConfigValue => f.write_str("configured master key"),
            KeySource::KeyFile(path) => write!(f, "key file {}", path.display()),
        }
    }
}

/// Startup-fatal master key resolution failures
#[derive(Error, Debug)]
pub enum MasterKeyError {
    #[error("{source_kind} is not valid hex")]
    MalformedHex { source_kind: KeySource },

    #[error("{source_kind} must be {expected} bytes, got {actual}")]
    WrongLength {
        source_kind: KeySource,
        expected: usize,
        actual: usize,
    },

    #[error("master key file I/O failed for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Decryption(#[from] DecryptionError),

    #[error("master key unavailable: {0}")]
    MasterKey(#[from] MasterKeyError),

    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),

    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("partyId must not be empty")]
    MissingPartyId,

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("record not found: {0}")]
    NotFound(String),
}

impl CoreError {
    /// True for failures caused by caller input (map to a 4xx response)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::Validation(_)
                | CoreError::Decryption(_)
                | CoreError::MissingPartyId
                | CoreError::NotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
