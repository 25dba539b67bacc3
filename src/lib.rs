//! # Retail Admin Core
//!
//! Data core for a small retail and invoicing administration panel: client,
//! user, product, supplier and category lists, plus a JSON backup/restore of
//! the panel's local key/value store.
//!
//! ## Pieces
//!
//! - [`entity_list::EntityList`]: one generic list controller (filter, create,
//!   edit, two-step delete, modal form draft) instantiated per record type in
//!   [`models`]. Lists live in memory only.
//! - [`backup`]: export every entry of a [`local_store::KeyValueStore`] to
//!   `copia_seguridad.json`, and merge such a file back in. A malformed file
//!   never writes anything.
//! - [`local_store`]: the store capability with an LMDB backend and an
//!   in-memory backend.
//!
//! ## Quick Start
//!
//! ```
//! use retail_admin_core::entity_list::EntityList;
//! use retail_admin_core::models::{Category, CategoryDraft};
//!
//! let mut categories: EntityList<Category> = EntityList::new();
//! let draft = CategoryDraft { name: "Tools".into(), ..Default::default() };
//! let id = categories.create(draft)?.id;
//! assert_eq!(id, 1);
//! assert_eq!(categories.filter("tool").len(), 1);
//! # Ok::<(), retail_admin_core::AppResponse>(())
//! ```
//!
//! ## FFI Functions
//!
//! A host UI drives the backup feature through C-compatible functions. Every
//! function except [`create_store`] returns a JSON-serialized [`AppResponse`]:
//!
//! - [`create_store`] - Open or create an LMDB store
//! - [`store_write`] / [`store_read`] - Single-key access
//! - [`backup_export`] - Export the whole store as a backup document
//! - [`backup_import`] - Merge a backup document into the store
//! - [`close_store`] - Sync and release the store

pub mod app_response;
pub mod backup;
pub mod entity;
pub mod entity_list;
pub mod local_store;
pub mod models;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};

pub use crate::app_response::AppResponse;
use crate::local_store::{KeyValueStore, LmdbStore};

/// Opens (or creates) the LMDB store `<name>.lmdb`.
///
/// # Parameters
///
/// * `name` - Null-terminated C string with the store name, optionally a path
///
/// # Returns
///
/// A pointer to the [`LmdbStore`], or null on failure. Release it with
/// [`close_store`].
///
/// # Safety
///
/// `name` must be null or point to a valid null-terminated string.
///
/// # Errors
///
/// Returns null if:
/// - `name` is null or not valid UTF-8
/// - `name` is empty
/// - The directory cannot be created or LMDB fails to open the environment
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use retail_admin_core::create_store;
///
/// let name = CString::new("panel_store").unwrap();
/// let store = create_store(name.as_ptr());
/// assert!(!store.is_null());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store(name: *const c_char) -> *mut LmdbStore {
    if name.is_null() {
        warn!("Null name pointer passed to create_store");
        return std::ptr::null_mut();
    }

    let name_str = match unsafe { CStr::from_ptr(name).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in name parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    match LmdbStore::init(name_str) {
        Ok(store) => {
            info!("Store '{name_str}' ready");
            Box::into_raw(Box::new(store))
        }
        Err(e) => {
            warn!("Failed to open store '{name_str}': {e}");
            std::ptr::null_mut()
        }
    }
}

/// Writes one key, overwriting any previous value.
///
/// # Parameters
///
/// * `store` - Pointer returned by [`create_store`]
/// * `key` - Null-terminated key, 1 to 511 bytes
/// * `value` - Null-terminated value
///
/// # Returns
///
/// A JSON [`AppResponse`]; `Ok` carries the key that was written. The caller
/// owns the returned string.
///
/// # Safety
///
/// `store` must be null or a live pointer from [`create_store`]. `key` and
/// `value` must be null or valid null-terminated strings.
///
/// # Errors
///
/// - `BadRequest` for null pointers, invalid UTF-8, or an empty/over-long key
/// - `StoreError` when LMDB rejects the write (for example a full map)
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use retail_admin_core::{create_store, store_write};
///
/// let name = CString::new("panel_store").unwrap();
/// let store = create_store(name.as_ptr());
///
/// let key = CString::new("theme").unwrap();
/// let value = CString::new("dark").unwrap();
/// let response = store_write(store, key.as_ptr(), value.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn store_write(
    store: *mut LmdbStore,
    key: *const c_char,
    value: *const c_char,
) -> *const c_char {
    let store = match unsafe { store.as_mut() } {
        Some(s) => s,
        None => return response_to_c_string(&null_store("store_write")),
    };

    let key = match c_ptr_to_string(key, "key") {
        Ok(k) => k,
        Err(err) => return err,
    };
    let value = match c_ptr_to_string(value, "value") {
        Ok(v) => v,
        Err(err) => return err,
    };

    match store.write(&key, &value) {
        Ok(()) => response_to_c_string(&AppResponse::Ok(key)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Reads one key.
///
/// # Parameters
///
/// * `store` - Pointer returned by [`create_store`]
/// * `key` - Null-terminated key
///
/// # Returns
///
/// A JSON [`AppResponse`]; `Ok` carries the stored value.
///
/// # Safety
///
/// `store` must be null or a live pointer from [`create_store`]; `key` must be
/// null or a valid null-terminated string.
///
/// # Errors
///
/// - `NotFound` when nothing is stored under `key`
/// - `BadRequest` for null pointers or invalid UTF-8
/// - `StoreError` / `SerializationError` for LMDB failures or non-UTF-8 data
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn store_read(store: *mut LmdbStore, key: *const c_char) -> *const c_char {
    let store = match unsafe { store.as_ref() } {
        Some(s) => s,
        None => return response_to_c_string(&null_store("store_read")),
    };

    let key = match c_ptr_to_string(key, "key") {
        Ok(k) => k,
        Err(err) => return err,
    };

    let response = match store.read(&key) {
        Ok(Some(value)) => AppResponse::Ok(value),
        Ok(None) => AppResponse::NotFound(format!("No value stored under key: {key}")),
        Err(e) => e,
    };
    response_to_c_string(&response)
}

/// Exports every entry of the store as a backup document.
///
/// # Parameters
///
/// * `store` - Pointer returned by [`create_store`]
///
/// # Returns
///
/// A JSON [`AppResponse`]; `Ok` carries the pretty-printed document, which
/// the host offers as `copia_seguridad.json` (`application/json`). An empty
/// store exports as `{}`.
///
/// # Safety
///
/// `store` must be null or a live pointer from [`create_store`].
///
/// # Errors
///
/// - `BadRequest` for a null store pointer
/// - `StoreError` / `SerializationError` when the store cannot be read
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn backup_export(store: *mut LmdbStore) -> *const c_char {
    let store = match unsafe { store.as_ref() } {
        Some(s) => s,
        None => return response_to_c_string(&null_store("backup_export")),
    };

    match backup::export_backup(store) {
        Ok(file) => response_to_c_string(&AppResponse::Ok(file.contents)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Merges a backup document into the store.
///
/// Keys in the document overwrite, keys missing from it are left alone. The
/// whole document is validated before anything is written.
///
/// # Parameters
///
/// * `store` - Pointer returned by [`create_store`]
/// * `json_ptr` - Null-terminated backup document
///
/// # Returns
///
/// A JSON [`AppResponse`]; `Ok` reports how many keys were written.
///
/// # Safety
///
/// `store` must be null or a live pointer from [`create_store`]; `json_ptr`
/// must be null or a valid null-terminated string.
///
/// # Errors
///
/// The store is left untouched on every error:
/// - `SerializationError` when the document is not JSON
/// - `ValidationError` when it is not an object or holds an unusable key
/// - `BadRequest` for null pointers or invalid UTF-8
/// - `StoreError` when the write transaction fails
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use retail_admin_core::{backup_import, create_store};
///
/// let name = CString::new("panel_store").unwrap();
/// let store = create_store(name.as_ptr());
///
/// let doc = CString::new(r#"{"theme":"dark"}"#).unwrap();
/// let response = backup_import(store, doc.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn backup_import(store: *mut LmdbStore, json_ptr: *const c_char) -> *const c_char {
    let store = match unsafe { store.as_mut() } {
        Some(s) => s,
        None => return response_to_c_string(&null_store("backup_import")),
    };

    let json = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(j) => j,
        Err(err) => return err,
    };

    match backup::import_backup(store, &json) {
        Ok(report) => response_to_c_string(&AppResponse::Ok(format!(
            "Restore complete: {} keys written",
            report.keys_written
        ))),
        Err(e) => response_to_c_string(&e),
    }
}

/// Syncs and releases a store.
///
/// # Parameters
///
/// * `store` - Pointer returned by [`create_store`]
///
/// # Returns
///
/// A JSON [`AppResponse`] indicating success or failure.
///
/// # Safety
///
/// `store` must be null or a live pointer from [`create_store`]. The pointer
/// is freed by this call and must not be used afterwards.
///
/// # Errors
///
/// - `BadRequest` for a null store pointer
/// - `StoreError` when the final sync fails; the store is released anyway
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_store(store: *mut LmdbStore) -> *const c_char {
    if store.is_null() {
        return response_to_c_string(&null_store("close_store"));
    }

    let store = unsafe { Box::from_raw(store) };
    match store.close() {
        Ok(()) => response_to_c_string(&AppResponse::success("Store closed successfully")),
        Err(e) => response_to_c_string(&e),
    }
}

fn null_store(function: &str) -> AppResponse {
    AppResponse::BadRequest(format!("Null store pointer passed to {function}"))
}

/// Serializes `response` into a heap C string owned by the caller. Null if
/// serialization fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string argument, turning null pointers and invalid UTF-8
/// into a ready-to-return `BadRequest` response.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
