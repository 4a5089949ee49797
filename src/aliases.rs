// src/aliases.rs
//! Zeroizing secret types
//!
//! These are the canonical containers for key material and decrypted bytes
//! used throughout encrypted-txn-vault. Everything here wipes itself on drop.

use zeroize::Zeroizing;

use crate::consts::KEY_LEN;

/// 256-bit key bytes (DEK or master key material)
pub type Key32 = Zeroizing<[u8; KEY_LEN]>;

/// Decrypted bytes: unwrapped DEKs and payload plaintext
pub type PlainText = Zeroizing<Vec<u8>>;
