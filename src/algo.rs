// src/algo.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::SUPPORTED_ALG;

/// Record encryption algorithms. Exactly one is supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EncryptionAlgorithm {
    #[default]
    #[serde(rename = "AES-256-GCM")]
    Aes256Gcm,
}

impl EncryptionAlgorithm {
    /// Wire tag stored in `SecureRecord::alg`
    pub fn as_str(&self) -> &'static str {
        match self {
            EncryptionAlgorithm::Aes256Gcm => SUPPORTED_ALG,
        }
    }

    /// Parse a wire tag; exact match only
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            SUPPORTED_ALG => Some(EncryptionAlgorithm::Aes256Gcm),
            _ => None,
        }
    }
}

impl fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
