// src/core/validate.rs
//! Structural record validation, run before any decrypt attempt
//!
//! Pure: no key material, no side effects. Checks short-circuit in a fixed
//! order (nonces, tags, ciphertexts, alg, mk_version).

use crate::algo::EncryptionAlgorithm;
use crate::consts::{NONCE_LEN, SUPPORTED_MK_VERSION, TAG_LEN};
use crate::core::record::SecureRecord;
use crate::error::ValidationError;

pub fn validate(record: &SecureRecord) -> Result<(), ValidationError> {
    decode_fixed::<NONCE_LEN>("payload_nonce", &record.payload_nonce)?;
    decode_fixed::<NONCE_LEN>("dek_wrap_nonce", &record.dek_wrap_nonce)?;

    decode_fixed::<TAG_LEN>("payload_tag", &record.payload_tag)?;
    decode_fixed::<TAG_LEN>("dek_wrap_tag", &record.dek_wrap_tag)?;

    decode_non_empty("payload_ct", &record.payload_ct)?;
    decode_non_empty("dek_wrapped", &record.dek_wrapped)?;

    if EncryptionAlgorithm::from_tag(&record.alg).is_none() {
        return Err(ValidationError::UnsupportedAlgorithm(record.alg.clone()));
    }
    if record.mk_version != SUPPORTED_MK_VERSION {
        return Err(ValidationError::UnsupportedVersion(record.mk_version));
    }

    Ok(())
}

/// Hex-decode a field; hex validity is checked independently of length
pub(crate) fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, ValidationError> {
    hex::decode(value).map_err(|_| ValidationError::InvalidHex { field })
}

/// Hex-decode a field that must be exactly `N` bytes
pub(crate) fn decode_fixed<const N: usize>(
    field: &'static str,
    value: &str,
) -> Result<[u8; N], ValidationError> {
    let bytes = decode_hex(field, value)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ValidationError::InvalidLength {
            field,
            expected: N,
            actual: bytes.len(),
        })
}

/// Hex-decode a variable-length field that must not be empty
pub(crate) fn decode_non_empty(
    field: &'static str,
    value: &str,
) -> Result<Vec<u8>, ValidationError> {
    let bytes = decode_hex(field, value)?;
    if bytes.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(bytes)
}
