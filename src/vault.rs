// src/vault.rs
//! High-level workflows: encode + persist, lookup + decode
//!
//! This is the surface an HTTP layer sits on. It coordinates the codec and
//! the record database; it never exposes a DEK or the master key.

use std::path::Path;

use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::core::envelope::EnvelopeCodec;
use crate::core::master_key::MasterKeyProvider;
use crate::core::record::{DecodedRecord, RecordSummary, SecureRecord};
use crate::db::{self, open_record_db};
use crate::error::{CoreError, Result};

pub struct TxnVault {
    codec: EnvelopeCodec,
    conn: Connection,
}

impl TxnVault {
    /// Resolve the master key and open the database named by `config`
    pub fn open(config: &Config) -> Result<Self> {
        let provider = MasterKeyProvider::new(config.master_key.clone());
        let codec = EnvelopeCodec::new(provider.resolve()?);
        Self::with_codec(codec, &config.storage.db_path)
    }

    pub fn with_codec<P: AsRef<Path>>(codec: EnvelopeCodec, db_path: P) -> Result<Self> {
        let conn = open_record_db(db_path)?;
        Ok(Self { codec, conn })
    }

    pub fn from_parts(codec: EnvelopeCodec, conn: Connection) -> Self {
        Self { codec, conn }
    }

    pub fn codec(&self) -> &EnvelopeCodec {
        &self.codec
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Encrypt and store a payload; only the summary goes back to the caller
    pub fn encrypt<T>(&self, party_id: &str, payload: &T) -> Result<RecordSummary>
    where
        T: Serialize + ?Sized,
    {
        let record = self.codec.encode(party_id, payload)?;
        db::insert_record(&self.conn, &record)?;
        info!(id = %record.id, party_id, "stored encrypted record");
        Ok(record.summary())
    }

    /// The record as stored: ciphertext and tags, never plaintext
    pub fn fetch(&self, id: &str) -> Result<SecureRecord> {
        db::get_record(&self.conn, id)?.ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    pub fn decrypt(&self, id: &str) -> Result<DecodedRecord> {
        let record = self.fetch(id)?;
        self.codec.decode(&record)
    }

    pub fn list(&self, party_id: Option<&str>) -> Result<Vec<RecordSummary>> {
        Ok(db::list_summaries(&self.conn, party_id)?)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        let removed = db::delete_record(&self.conn, id)?;
        if removed {
            info!(id, "deleted record");
        }
        Ok(removed)
    }
}
