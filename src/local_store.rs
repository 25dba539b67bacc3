//! Key/value persistence behind the backup feature.
//!
//! [`KeyValueStore`] is the capability the backup codec depends on. Two
//! backends are provided: [`LmdbStore`], an on-disk LMDB environment, and
//! [`MemoryStore`], used by tests and by hosts that keep their own storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use lmdb::{Cursor, Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{debug, info, warn};

use crate::app_response::AppResponse;

const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;
/// LMDB's compiled-in maximum key length.
pub const MAX_KEY_BYTES: usize = 511;
const MAIN_DB_NAME: &str = "main";

/// String-keyed, string-valued storage.
///
/// Iteration order is whatever the backend yields; callers must not rely on
/// a global ordering.
pub trait KeyValueStore {
    fn keys(&self) -> Result<Vec<String>, AppResponse>;

    fn read(&self, key: &str) -> Result<Option<String>, AppResponse>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), AppResponse>;

    /// Returns `true` when the key existed.
    fn remove(&mut self, key: &str) -> Result<bool, AppResponse>;

    /// Every key with its value, in iteration order.
    fn entries(&self) -> Result<Vec<(String, String)>, AppResponse> {
        let mut entries = Vec::new();
        for key in self.keys()? {
            if let Some(value) = self.read(&key)? {
                entries.push((key, value));
            }
        }
        Ok(entries)
    }

    /// Writes a batch of entries. Backends that can do so apply the batch
    /// atomically.
    fn write_all(&mut self, entries: &[(String, String)]) -> Result<(), AppResponse> {
        for (key, value) in entries {
            self.write(key, value)?;
        }
        Ok(())
    }
}

/// Settings for opening an [`LmdbStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store name; the environment lives in `<name>.lmdb`.
    pub name: String,
    pub map_size: usize,
    pub create_if_missing: bool,
}

impl StoreConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map_size: DEFAULT_MAP_SIZE,
            create_if_missing: true,
        }
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn with_create_if_missing(mut self, create_if_missing: bool) -> Self {
        self.create_if_missing = create_if_missing;
        self
    }

    pub fn directory(&self) -> PathBuf {
        PathBuf::from(format!("{}.lmdb", self.name))
    }
}

/// LMDB-backed store. One environment, one named database.
pub struct LmdbStore {
    env: Environment,
    db: Database,
    path: PathBuf,
}

impl LmdbStore {
    /// Opens (or creates) the store named `name` with default settings.
    pub fn init(name: impl Into<String>) -> Result<Self, AppResponse> {
        Self::open(&StoreConfig::new(name))
    }

    pub fn open(config: &StoreConfig) -> Result<Self, AppResponse> {
        if config.name.is_empty() {
            return Err(AppResponse::BadRequest("Store name cannot be empty".to_string()));
        }

        let path = config.directory();
        if !path.exists() {
            if !config.create_if_missing {
                return Err(AppResponse::NotFound(format!(
                    "Store directory {} does not exist",
                    path.display()
                )));
            }
            info!("Creating store directory at {}", path.display());
            fs::create_dir_all(&path)?;
        }

        let env = Environment::new()
            .set_max_dbs(1)
            .set_map_size(config.map_size)
            .open(&path)?;
        let db = env.create_db(Some(MAIN_DB_NAME), DatabaseFlags::empty())?;

        info!("Store opened at {}", path.display());
        Ok(Self { env, db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes every entry, returning how many were removed.
    pub fn clear(&self) -> Result<usize, AppResponse> {
        let count = self.keys()?.len();
        let mut txn = self.env.begin_rw_txn()?;
        txn.clear_db(self.db)?;
        txn.commit()?;
        info!("Cleared {count} entries from {}", self.path.display());
        Ok(count)
    }

    /// Flushes buffers to disk. The environment itself closes on drop.
    pub fn close(self) -> Result<(), AppResponse> {
        if let Err(e) = self.env.sync(true) {
            warn!("Failed to sync store before closing: {e}");
            return Err(AppResponse::from(e));
        }
        info!("Store at {} closed", self.path.display());
        Ok(())
    }
}

fn valid_key(key: &str) -> bool {
    !key.is_empty() && key.len() <= MAX_KEY_BYTES
}

fn utf8(bytes: &[u8], what: &str) -> Result<String, AppResponse> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| AppResponse::SerializationError(format!("Stored {what} is not UTF-8: {e}")))
}

impl KeyValueStore for LmdbStore {
    fn keys(&self) -> Result<Vec<String>, AppResponse> {
        Ok(self.entries()?.into_iter().map(|(key, _)| key).collect())
    }

    fn read(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let txn = self.env.begin_ro_txn()?;
        let value = match txn.get(self.db, &key) {
            Ok(bytes) => Some(utf8(bytes, "value")?),
            Err(lmdb::Error::NotFound) => None,
            Err(e) => return Err(AppResponse::from(e)),
        };
        txn.abort();
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), AppResponse> {
        if !valid_key(key) {
            return Err(AppResponse::BadRequest(format!(
                "Store keys must be 1..={MAX_KEY_BYTES} bytes"
            )));
        }
        let mut txn = self.env.begin_rw_txn()?;
        txn.put(self.db, &key, &value, WriteFlags::empty())?;
        txn.commit()?;
        debug!("Wrote key {key}");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, AppResponse> {
        let mut txn = self.env.begin_rw_txn()?;
        match txn.del(self.db, &key, None) {
            Ok(()) => {
                txn.commit()?;
                Ok(true)
            }
            Err(lmdb::Error::NotFound) => {
                txn.abort();
                Ok(false)
            }
            Err(e) => Err(AppResponse::from(e)),
        }
    }

    fn entries(&self) -> Result<Vec<(String, String)>, AppResponse> {
        let txn = self.env.begin_ro_txn()?;
        let mut entries = Vec::new();
        {
            let mut cursor = txn.open_ro_cursor(self.db)?;
            // `iter_start` unwraps MDB_NOTFOUND on an empty database; `iter`
            // on an unpositioned cursor starts at the first entry instead.
            for (key, value) in cursor.iter() {
                entries.push((utf8(key, "key")?, utf8(value, "value")?));
            }
        }
        txn.abort();
        Ok(entries)
    }

    fn write_all(&mut self, entries: &[(String, String)]) -> Result<(), AppResponse> {
        if !entries.iter().all(|(key, _)| valid_key(key)) {
            return Err(AppResponse::BadRequest(format!(
                "Store keys must be 1..={MAX_KEY_BYTES} bytes"
            )));
        }
        let mut txn = self.env.begin_rw_txn()?;
        for (key, value) in entries {
            // An error drops `txn`, which aborts every write made so far.
            txn.put(self.db, key, value, WriteFlags::empty())?;
        }
        txn.commit()?;
        debug!("Wrote {} keys in one transaction", entries.len());
        Ok(())
    }
}

/// In-memory store. Keys iterate in sorted order, like LMDB.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn keys(&self) -> Result<Vec<String>, AppResponse> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn read(&self, key: &str) -> Result<Option<String>, AppResponse> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), AppResponse> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, AppResponse> {
        Ok(self.entries.remove(key).is_some())
    }

    fn entries(&self) -> Result<Vec<(String, String)>, AppResponse> {
        Ok(self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
