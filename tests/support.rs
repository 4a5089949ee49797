// tests/support.rs
//! Test utilities: fixed-key codecs, temp vaults and record tampering

use std::sync::Arc;

use encrypted_txn_vault::core::{EnvelopeCodec, MasterKey};
use encrypted_txn_vault::db::open_in_memory;
use encrypted_txn_vault::TxnVault;
use tempfile::TempDir;

#[allow(dead_code)]
pub const TEST_KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

#[allow(dead_code)]
pub fn test_master_key() -> Arc<MasterKey> {
    let mut bytes = [0u8; 32];
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = i as u8;
    }
    Arc::new(MasterKey::from_bytes(bytes))
}

#[allow(dead_code)]
pub fn test_codec() -> EnvelopeCodec {
    EnvelopeCodec::new(test_master_key())
}

/// Codec under a fresh random master key
#[allow(dead_code)]
pub fn random_codec() -> EnvelopeCodec {
    EnvelopeCodec::new(Arc::new(MasterKey::generate()))
}

/// In-memory vault for workflow tests
#[allow(dead_code)]
pub fn memory_vault() -> TxnVault {
    TxnVault::from_parts(test_codec(), open_in_memory().expect("open in-memory db"))
}

/// Vault backed by a real file in a temp dir (the dir must outlive the vault)
#[allow(dead_code)]
pub fn file_vault() -> (TempDir, TxnVault) {
    let dir = tempfile::tempdir().expect("tempdir");
    let vault = TxnVault::with_codec(test_codec(), dir.path().join("db/records.db"))
        .expect("open file vault");
    (dir, vault)
}

/// Flip one bit of a hex-encoded field, keeping it valid hex of the same length
#[allow(dead_code)]
pub fn flip_bit_hex(hex_value: &str, byte_index: usize, bit: u8) -> String {
    let mut bytes = hex::decode(hex_value).expect("field is hex");
    bytes[byte_index] ^= 1 << bit;
    hex::encode(bytes)
}

/// Hex string of `len` zero bytes
#[allow(dead_code)]
pub fn zero_hex(len: usize) -> String {
    "00".repeat(len)
}
