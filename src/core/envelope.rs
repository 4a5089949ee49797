// src/core/envelope.rs
//! Envelope codec for encrypted-txn-vault
//!
//! Each record gets a fresh 256-bit DEK. The payload is sealed under the DEK,
//! the DEK is sealed under the master key, and only the wrapped DEK is kept.
//! The DEK itself lives in a zeroizing buffer for the length of one call.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::algo::EncryptionAlgorithm;
use crate::consts::{KEY_LEN, NONCE_LEN, SUPPORTED_MK_VERSION, TAG_LEN};
use crate::core::crypto::{open, seal};
use crate::core::key::{generate_key, generate_record_id, MasterKey};
use crate::core::record::{DecodedRecord, SecureRecord};
use crate::core::validate::{decode_fixed, decode_non_empty, validate};
use crate::error::{CoreError, DecryptionError, Result};

/// Encodes payloads into `SecureRecord`s and back.
///
/// Cheap to clone; clones share the same read-only master key, so one codec
/// can serve any number of threads.
#[derive(Debug, Clone)]
pub struct EnvelopeCodec {
    master_key: Arc<MasterKey>,
}

impl EnvelopeCodec {
    pub fn new(master_key: Arc<MasterKey>) -> Self {
        Self { master_key }
    }

    /// Encrypt `payload` for `party_id`. Does not persist anything.
    pub fn encode<T>(&self, party_id: &str, payload: &T) -> Result<SecureRecord>
    where
        T: Serialize + ?Sized,
    {
        if party_id.is_empty() {
            return Err(CoreError::MissingPartyId);
        }

        let dek = generate_key();
        let payload_bytes = Zeroizing::new(canonical_json(payload)?);

        let payload_sealed = seal(&payload_bytes, &dek)?;
        let dek_sealed = seal(dek.as_slice(), self.master_key.expose_secret())?;

        let (payload_nonce, payload_ct, payload_tag) = payload_sealed.to_hex();
        let (dek_wrap_nonce, dek_wrapped, dek_wrap_tag) = dek_sealed.to_hex();

        let record = SecureRecord {
            id: generate_record_id(),
            party_id: party_id.to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            payload_nonce,
            payload_ct,
            payload_tag,
            dek_wrap_nonce,
            dek_wrapped,
            dek_wrap_tag,
            alg: EncryptionAlgorithm::default().as_str().to_string(),
            mk_version: SUPPORTED_MK_VERSION,
        };

        debug!(id = %record.id, bytes = payload_bytes.len(), "encoded record");
        Ok(record)
    }

    /// Validate, unwrap the DEK, decrypt and parse the payload
    pub fn decode(&self, record: &SecureRecord) -> Result<DecodedRecord> {
        if let Err(err) = validate(record) {
            warn!(id = %record.id, field = err.field(), "rejected malformed record");
            return Err(err.into());
        }

        let dek = self.unwrap_dek(record).inspect_err(|err| {
            warn!(id = %record.id, "{err}");
        })?;

        let payload = decrypt_payload(record, &dek).inspect_err(|err| {
            warn!(id = %record.id, "{err}");
        })?;

        debug!(id = %record.id, "decoded record");
        Ok(DecodedRecord {
            party_id: record.party_id.clone(),
            payload,
            created_at: record.created_at.clone(),
        })
    }

    fn unwrap_dek(&self, record: &SecureRecord) -> Result<Zeroizing<[u8; KEY_LEN]>> {
        let failed = DecryptionError {
            field: "dek_wrapped",
        };

        let nonce = decode_fixed::<NONCE_LEN>("dek_wrap_nonce", &record.dek_wrap_nonce)?;
        let tag = decode_fixed::<TAG_LEN>("dek_wrap_tag", &record.dek_wrap_tag)?;
        let wrapped = decode_non_empty("dek_wrapped", &record.dek_wrapped)?;

        let plain = open(&wrapped, self.master_key.expose_secret(), &nonce, &tag)
            .map_err(|_| failed.clone())?;

        if plain.len() != KEY_LEN {
            return Err(failed.into());
        }
        let mut dek = Zeroizing::new([0u8; KEY_LEN]);
        dek.copy_from_slice(&plain);
        Ok(dek)
    }
}

fn decrypt_payload(record: &SecureRecord, dek: &[u8; KEY_LEN]) -> Result<serde_json::Value> {
    let failed = DecryptionError {
        field: "payload_ct",
    };

    let nonce = decode_fixed::<NONCE_LEN>("payload_nonce", &record.payload_nonce)?;
    let tag = decode_fixed::<TAG_LEN>("payload_tag", &record.payload_tag)?;
    let ciphertext = decode_non_empty("payload_ct", &record.payload_ct)?;

    let plain = open(&ciphertext, dek, &nonce, &tag).map_err(|_| failed.clone())?;

    // Authenticated but not JSON: treated exactly like a tag mismatch
    serde_json::from_slice(&plain).map_err(|_| failed.into())
}

/// Canonical JSON bytes: sorted object keys, no insignificant whitespace
pub fn canonical_json<T>(payload: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(payload)?;
    Ok(serde_json::to_vec(&value)?)
}
