// src/db/record_db_conn.rs
use std::{fs, path::Path};

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS secure_records (
        id             TEXT PRIMARY KEY,
        party_id       TEXT NOT NULL,
        created_at     TEXT NOT NULL,
        payload_nonce  TEXT NOT NULL,
        payload_ct     TEXT NOT NULL,
        payload_tag    TEXT NOT NULL,
        dek_wrap_nonce TEXT NOT NULL,
        dek_wrapped    TEXT NOT NULL,
        dek_wrap_tag   TEXT NOT NULL,
        alg            TEXT NOT NULL,
        mk_version     INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_secure_records_party_id ON secure_records(party_id);
    CREATE INDEX IF NOT EXISTS idx_secure_records_created_at ON secure_records(created_at);
"#;

/// Open (creating if needed) the record database at `db_path`
pub fn open_record_db<P: AsRef<Path>>(db_path: P) -> Result<Connection> {
    let db_path = db_path.as_ref();

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path)?;
    conn.execute_batch(SCHEMA)?;

    debug!(path = %db_path.display(), "opened record database");
    Ok(conn)
}

/// Throwaway in-memory database with the same schema
pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}
