// src/core/record.rs
//! At-rest record shapes
//!
//! Field names and hex encodings are the stored/wire format and must not
//! change: existing records are decoded against them.

use serde::{Deserialize, Serialize};

/// One encrypted transaction as persisted.
///
/// Created only by `EnvelopeCodec::encode`; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureRecord {
    pub id: String,
    #[serde(rename = "partyId")]
    pub party_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub payload_nonce: String,
    pub payload_ct: String,
    pub payload_tag: String,
    pub dek_wrap_nonce: String,
    pub dek_wrapped: String,
    pub dek_wrap_tag: String,
    pub alg: String,
    pub mk_version: i64,
}

impl SecureRecord {
    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            id: self.id.clone(),
            party_id: self.party_id.clone(),
            created_at: self.created_at.clone(),
            alg: self.alg.clone(),
            mk_version: self.mk_version,
        }
    }
}

/// What an encrypt request hands back: no ciphertext, no tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: String,
    #[serde(rename = "partyId")]
    pub party_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub alg: String,
    pub mk_version: i64,
}

/// Result of a successful decode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedRecord {
    #[serde(rename = "partyId")]
    pub party_id: String,
    pub payload: serde_json::Value,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}
