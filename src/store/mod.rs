//! Persistence for the club collections.
//!
//! `DocumentStore` is the whole interface the rest of the crate sees. Two
//! backends implement it: `RemoteStore` (hosted JSON database with a local
//! cache that is used whenever the network is unavailable) and `FileStore`
//! (local JSON files only). `open_store` picks one at startup.

pub mod file;
pub mod remote;

use anyhow::Result;
use log::info;
use serde_json::Value;

use crate::config::StoreSettings;
use crate::domain::Collection;

pub use file::FileStore;
pub use remote::RemoteStore;

/// Whether a write reached the remote store or only the local copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Synced,
    LocalOnly,
}

#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Current document, `None` when nothing has been stored yet.
    async fn get(&self, collection: Collection) -> Result<Option<Value>>;

    /// Overwrite the whole document.
    async fn put(&self, collection: Collection, document: &Value) -> Result<SyncStatus>;

    /// Merge top-level fields into the document.
    async fn patch(&self, collection: Collection, fields: &Value) -> Result<SyncStatus>;

    async fn delete(&self, collection: Collection) -> Result<SyncStatus>;
}

pub enum Store {
    Remote(RemoteStore),
    File(FileStore),
}

impl Store {
    pub fn describe(&self) -> String {
        match self {
            Store::Remote(store) => format!("remote ({})", store.base_url()),
            Store::File(store) => format!("local files ({})", store.dir().display()),
        }
    }
}

pub fn open_store(settings: &StoreSettings) -> Result<Store> {
    let store = if settings.remote_configured() {
        Store::Remote(RemoteStore::new(settings)?)
    } else {
        Store::File(FileStore::new(&settings.data_dir)?)
    };
    info!("Using {} store", store.describe());
    Ok(store)
}

impl DocumentStore for Store {
    async fn get(&self, collection: Collection) -> Result<Option<Value>> {
        match self {
            Store::Remote(store) => store.get(collection).await,
            Store::File(store) => store.get(collection).await,
        }
    }

    async fn put(&self, collection: Collection, document: &Value) -> Result<SyncStatus> {
        match self {
            Store::Remote(store) => store.put(collection, document).await,
            Store::File(store) => store.put(collection, document).await,
        }
    }

    async fn patch(&self, collection: Collection, fields: &Value) -> Result<SyncStatus> {
        match self {
            Store::Remote(store) => store.patch(collection, fields).await,
            Store::File(store) => store.patch(collection, fields).await,
        }
    }

    async fn delete(&self, collection: Collection) -> Result<SyncStatus> {
        match self {
            Store::Remote(store) => store.delete(collection).await,
            Store::File(store) => store.delete(collection).await,
        }
    }
}

/// Shallow merge of `fields` into `target`; a non-object target is replaced.
pub(crate) fn merge_fields(target: &mut Value, fields: &Value) {
    let Some(fields) = fields.as_object() else {
        *target = fields.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Default::default());
    }
    if let Some(object) = target.as_object_mut() {
        for (key, value) in fields {
            object.insert(key.clone(), value.clone());
        }
    }
}
