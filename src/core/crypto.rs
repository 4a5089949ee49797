// src/core/crypto.rs
//! Pure cryptographic primitives: no I/O, no database
//!
//! AES-256-GCM with a detached tag. Every `seal` draws a fresh random 96-bit
//! nonce; there is no nonce counter.

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce, Tag};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::aliases::PlainText;
use crate::consts::{KEY_LEN, NONCE_LEN, TAG_LEN};
use crate::error::CipherError;

/// Output of one `seal`: nonce, ciphertext (same length as the plaintext)
/// and the detached authentication tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LEN],
}

impl Sealed {
    /// Lowercase hex of (nonce, ciphertext, tag)
    pub fn to_hex(&self) -> (String, String, String) {
        (
            hex::encode(self.nonce),
            hex::encode(&self.ciphertext),
            hex::encode(self.tag),
        )
    }
}

/// Generate a random 12-byte nonce
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce);
    nonce
}

fn cipher_for(key: &[u8; KEY_LEN]) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key))
}

/// Encrypt `plaintext` under `key` with a fresh nonce
pub fn seal(plaintext: &[u8], key: &[u8; KEY_LEN]) -> Result<Sealed, CipherError> {
    let nonce = generate_nonce();
    let mut buffer = plaintext.to_vec();

    let tag = cipher_for(key)
        .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut buffer)
        .map_err(|_| CipherError::EncryptionFailed)?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(tag.as_slice());

    Ok(Sealed {
        nonce,
        ciphertext: buffer,
        tag: tag_bytes,
    })
}

/// Decrypt and verify. Any mismatch is `AuthenticationFailed`; no partial
/// plaintext is ever returned.
pub fn open(
    ciphertext: &[u8],
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    tag: &[u8; TAG_LEN],
) -> Result<PlainText, CipherError> {
    let mut buffer = Zeroizing::new(ciphertext.to_vec());

    cipher_for(key)
        .decrypt_in_place_detached(
            Nonce::from_slice(nonce),
            b"",
            &mut buffer[..],
            Tag::from_slice(tag),
        )
        .map_err(|_| CipherError::AuthenticationFailed)?;

    Ok(buffer)
}
