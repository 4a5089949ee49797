// src/config/mod.rs
//! Configuration system for encrypted-txn-vault
//!
//! TOML file + environment overrides, loaded explicitly at startup.

pub use app::{Config, MasterKeySettings, StorageSettings};

mod app;
mod defaults;
