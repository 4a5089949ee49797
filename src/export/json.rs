// src/export/json.rs
use std::path::Path;

use chrono::Utc;
use rusqlite::Connection;
use serde_json::json;
use tracing::info;

use crate::consts::EXPORT_FORMAT;
use crate::db::list_records;
use crate::error::Result;

/// Export every stored record to a portable JSON file.
///
/// Returns the number of records written.
pub fn export_records_to_json<P: AsRef<Path>>(conn: &Connection, path: P) -> Result<usize> {
    let records = list_records(conn, None)?;

    let export = json!({
        "export_format": EXPORT_FORMAT,
        "exported_at": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "exporter_version": env!("CARGO_PKG_VERSION"),
        "total_records": records.len(),
        "records": records,
    });

    std::fs::write(path.as_ref(), serde_json::to_string_pretty(&export)?)?;
    info!(count = records.len(), path = %path.as_ref().display(), "exported records");

    Ok(records.len())
}
