// src/export/mod.rs
//! Export utilities for encrypted-txn-vault
//!
//! Exports carry records exactly as stored. Nothing is decrypted, so an
//! export is only as sensitive as the database itself.

pub use json::export_records_to_json;

pub mod json;
