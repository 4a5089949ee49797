// src/db/record_db_ops.rs
//! Record persistence: insert, lookup, listing and deletion

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::core::record::{RecordSummary, SecureRecord};

const RECORD_COLUMNS: &str = "id, party_id, created_at, payload_nonce, payload_ct, payload_tag, \
     dek_wrap_nonce, dek_wrapped, dek_wrap_tag, alg, mk_version";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<SecureRecord> {
    Ok(SecureRecord {
        id: row.get(0)?,
        party_id: row.get(1)?,
        created_at: row.get(2)?,
        payload_nonce: row.get(3)?,
        payload_ct: row.get(4)?,
        payload_tag: row.get(5)?,
        dek_wrap_nonce: row.get(6)?,
        dek_wrapped: row.get(7)?,
        dek_wrap_tag: row.get(8)?,
        alg: row.get(9)?,
        mk_version: row.get(10)?,
    })
}

/// Store a freshly encoded record. Ids are unique; a duplicate is an error.
pub fn insert_record(conn: &Connection, record: &SecureRecord) -> rusqlite::Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO secure_records ({RECORD_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
        ),
        params![
            &record.id,
            &record.party_id,
            &record.created_at,
            &record.payload_nonce,
            &record.payload_ct,
            &record.payload_tag,
            &record.dek_wrap_nonce,
            &record.dek_wrapped,
            &record.dek_wrap_tag,
            &record.alg,
            record.mk_version,
        ],
    )?;
    Ok(())
}

/// Fetch a record exactly as stored
pub fn get_record(conn: &Connection, id: &str) -> rusqlite::Result<Option<SecureRecord>> {
    conn.query_row(
        &format!("SELECT {RECORD_COLUMNS} FROM secure_records WHERE id = ?1"),
        [id],
        record_from_row,
    )
    .optional()
}

/// All records, optionally for one party, oldest first
pub fn list_records(
    conn: &Connection,
    party_id: Option<&str>,
) -> rusqlite::Result<Vec<SecureRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM secure_records
         WHERE (?1 IS NULL OR party_id = ?1)
         ORDER BY created_at, id"
    ))?;
    let records = stmt
        .query_map([party_id], record_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}

pub fn list_summaries(
    conn: &Connection,
    party_id: Option<&str>,
) -> rusqlite::Result<Vec<RecordSummary>> {
    Ok(list_records(conn, party_id)?
        .iter()
        .map(SecureRecord::summary)
        .collect())
}

/// Returns true if a row was removed
pub fn delete_record(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    let changed = conn.execute("DELETE FROM secure_records WHERE id = ?1", [id])?;
    Ok(changed > 0)
}

pub fn count_records(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM secure_records", [], |row| row.get(0))
}
