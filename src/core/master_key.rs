// src/core/master_key.rs
//! Master key resolution
//!
//! Resolution order, first match wins:
//! 1. an explicit hex value from configuration
//! 2. a previously persisted key file
//! 3. a freshly generated key, persisted to the key file
//!
//! The provider is an ordinary value: construct one at startup, resolve it
//! once, and hand the resulting `Arc<MasterKey>` to the codec.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::info;
use zeroize::Zeroizing;

use crate::config::MasterKeySettings;
use crate::consts::KEY_LEN;
use crate::core::key::MasterKey;
use crate::error::{KeySource, MasterKeyError};

pub struct MasterKeyProvider {
    settings: MasterKeySettings,
    key: OnceLock<Arc<MasterKey>>,
    init: Mutex<()>,
}

impl MasterKeyProvider {
    pub fn new(settings: MasterKeySettings) -> Self {
        Self {
            settings,
            key: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Resolve the master key. Repeated calls return the same key.
    pub fn resolve(&self) -> Result<Arc<MasterKey>, MasterKeyError> {
        if let Some(key) = self.key.get() {
            return Ok(Arc::clone(key));
        }

        // Serialize first resolution so two threads never both generate a key file
        let _guard = self.init.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(key) = self.key.get() {
            return Ok(Arc::clone(key));
        }

        let loaded = Arc::new(load_master_key(&self.settings)?);
        Ok(Arc::clone(self.key.get_or_init(|| loaded)))
    }
}

/// One-shot resolution without caching
pub fn load_master_key(settings: &MasterKeySettings) -> Result<MasterKey, MasterKeyError> {
    if let Some(configured) = settings
        .key_hex
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        info!("using configured master key");
        return decode_key_hex(configured, KeySource::ConfigValue);
    }

    let path = settings.key_file.as_path();
    if path.exists() {
        info!(path = %path.display(), "loading master key from key file");
        return read_key_file(path);
    }

    info!(path = %path.display(), "no master key found; generating a new one");
    let key = MasterKey::generate();
    match write_key_file(path, &key) {
        Ok(()) => Ok(key),
        // Another process persisted a key first; that one is authoritative
        Err(MasterKeyError::Io { err, .. }) if err.kind() == ErrorKind::AlreadyExists => {
            info!(path = %path.display(), "key file appeared concurrently; loading it");
            read_key_file(path)
        }
        Err(err) => Err(err),
    }
}

fn decode_key_hex(text: &str, source_kind: KeySource) -> Result<MasterKey, MasterKeyError> {
    let bytes = Zeroizing::new(
        hex::decode(text).map_err(|_| MasterKeyError::MalformedHex {
            source_kind: source_kind.clone(),
        })?,
    );

    let array: [u8; KEY_LEN] =
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| MasterKeyError::WrongLength {
                source_kind,
                expected: KEY_LEN,
                actual: bytes.len(),
            })?;

    Ok(MasterKey::from_bytes(array))
}

pub fn read_key_file(path: &Path) -> Result<MasterKey, MasterKeyError> {
    let text = Zeroizing::new(fs::read_to_string(path).map_err(|err| MasterKeyError::Io {
        path: path.to_path_buf(),
        err,
    })?);
    decode_key_hex(text.trim(), KeySource::KeyFile(path.to_path_buf()))
}

/// Persist the key as one line of lowercase hex.
///
/// Written to a temp file in the target directory, then linked into place.
/// Never replaces an existing file: that is an `Io` error of kind
/// `AlreadyExists`.
pub fn write_key_file(path: &Path, key: &MasterKey) -> Result<(), MasterKeyError> {
    let io_err = |err: std::io::Error| MasterKeyError::Io {
        path: path.to_path_buf(),
        err,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(io_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(io_err)?;
    tmp.write_all(key.to_hex().as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist_noclobber(path).map_err(|e| io_err(e.error))?;

    Ok(())
}
