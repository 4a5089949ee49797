// src/db/mod.rs
//! SQLite storage adapter for `SecureRecord`s
//!
//! Records are stored exactly as the codec produced them: hex text and an
//! integer `mk_version`. Nothing here touches key material.

pub mod record_db_conn;
pub mod record_db_ops;

pub use record_db_conn::{open_in_memory, open_record_db};
pub use record_db_ops::{
    count_records, delete_record, get_record, insert_record, list_records, list_summaries,
};
