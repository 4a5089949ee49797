// src/core/key.rs
//! Key generation and the master key container

use std::fmt;

use rand::RngCore;
use zeroize::Zeroizing;

use crate::aliases::Key32;
use crate::consts::{KEY_LEN, RECORD_ID_LEN};

/// Generate a new random 256-bit key (zeroized on drop)
pub fn generate_key() -> Key32 {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    rand::rng().fill_bytes(key.as_mut_slice());
    key
}

/// Fresh caller-opaque record id: 16 random bytes, lowercase hex
pub fn generate_record_id() -> String {
    let mut id = [0u8; RECORD_ID_LEN];
    rand::rng().fill_bytes(&mut id);
    hex::encode(id)
}

/// The process-wide key that wraps every DEK.
///
/// Read-only once constructed; shared behind an `Arc`.
pub struct MasterKey(Key32);

impl MasterKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        MasterKey(Zeroizing::new(bytes))
    }

    pub fn generate() -> Self {
        MasterKey(generate_key())
    }

    pub fn expose_secret(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Lowercase hex, the key file representation
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0.as_slice()))
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey([REDACTED])")
    }
}
