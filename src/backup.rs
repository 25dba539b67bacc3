//! Backup and restore of a whole [`KeyValueStore`] as one JSON document.
//!
//! The document is a flat object of string keys to string values, pretty
//! printed with two-space indentation. Import is a merge: keys present in
//! the file overwrite, keys absent from the file are left alone. A file that
//! fails to parse writes nothing.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde_json::{Map, Value as JsonValue};

use crate::app_response::AppResponse;
use crate::local_store::{KeyValueStore, MAX_KEY_BYTES};

pub const BACKUP_FILE_NAME: &str = "copia_seguridad.json";
pub const BACKUP_MIME_TYPE: &str = "application/json";

/// A serialized backup ready to hand to the user as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupFile {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

/// What an import wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub keys_written: usize,
    /// Keys that already existed and were overwritten.
    pub keys_overwritten: usize,
}

/// Serializes every entry of `store`.
pub fn export_backup<S: KeyValueStore + ?Sized>(store: &S) -> Result<BackupFile, AppResponse> {
    let entries = store.entries().map_err(|e| {
        warn!("Backup export could not read the store: {e}");
        e
    })?;

    let mut document = Map::with_capacity(entries.len());
    for (key, value) in entries {
        document.insert(key, JsonValue::String(value));
    }

    let contents = serde_json::to_string_pretty(&JsonValue::Object(document))?;
    info!("Exported backup ({} bytes)", contents.len());

    Ok(BackupFile {
        file_name: BACKUP_FILE_NAME,
        mime_type: BACKUP_MIME_TYPE,
        contents,
    })
}

/// Parses a backup document into key/value pairs without touching any store.
///
/// Non-string values are kept as their JSON text, so `1` becomes `"1"` and a
/// nested object becomes its compact serialization. Empty keys and keys
/// longer than [`MAX_KEY_BYTES`] make the whole file invalid.
pub fn parse_backup(contents: &str) -> Result<Vec<(String, String)>, AppResponse> {
    let parsed: JsonValue = serde_json::from_str(contents)
        .map_err(|e| AppResponse::SerializationError(format!("Invalid backup file: {e}")))?;

    let JsonValue::Object(document) = parsed else {
        return Err(AppResponse::ValidationError(
            "Invalid backup file: top-level value must be an object".to_string(),
        ));
    };

    if let Some(key) = document
        .keys()
        .find(|key| key.is_empty() || key.len() > MAX_KEY_BYTES)
    {
        return Err(AppResponse::ValidationError(format!(
            "Invalid backup file: key of {} bytes is outside 1..={MAX_KEY_BYTES}",
            key.len()
        )));
    }

    Ok(document
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                JsonValue::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}

/// Merges a backup document into `store`.
pub fn import_backup<S: KeyValueStore + ?Sized>(
    store: &mut S,
    contents: &str,
) -> Result<ImportReport, AppResponse> {
    let entries = parse_backup(contents).map_err(|e| {
        warn!("Rejected backup file: {e}");
        e
    })?;

    let mut keys_overwritten = 0;
    for (key, _) in &entries {
        if store.read(key)?.is_some() {
            keys_overwritten += 1;
        }
    }

    store.write_all(&entries)?;

    info!(
        "Restored backup: {} keys written, {keys_overwritten} overwritten",
        entries.len()
    );
    Ok(ImportReport {
        keys_written: entries.len(),
        keys_overwritten,
    })
}

/// Writes the export into `dir` as [`BACKUP_FILE_NAME`] and returns its path.
pub fn save_backup_file<S: KeyValueStore + ?Sized>(
    store: &S,
    dir: &Path,
) -> Result<PathBuf, AppResponse> {
    let backup = export_backup(store)?;
    let path = dir.join(backup.file_name);
    fs::write(&path, backup.contents.as_bytes())?;
    info!("Backup saved to {}", path.display());
    Ok(path)
}

/// Reads a backup file from disk and imports it.
pub fn restore_backup_file<S: KeyValueStore + ?Sized>(
    store: &mut S,
    path: &Path,
) -> Result<ImportReport, AppResponse> {
    let contents = fs::read_to_string(path).map_err(|e| {
        warn!("Could not read backup file {}: {e}", path.display());
        AppResponse::from(e)
    })?;
    import_backup(store, &contents)
}
