use anyhow::Result;
use serde_json::Value;
use std::path::Path;

use super::{merge_fields, DocumentStore, SyncStatus};
use crate::cache::Cache;
use crate::domain::Collection;
use crate::errors::with_store_context;

/// Collections kept as JSON files in one local directory
pub struct FileStore {
    cache: Cache,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(data_dir)?,
        })
    }

    pub fn dir(&self) -> &Path {
        self.cache.dir()
    }
}

impl DocumentStore for FileStore {
    async fn get(&self, collection: Collection) -> Result<Option<Value>> {
        with_store_context(self.cache.load(collection.as_str()), "read", collection.as_str())
    }

    async fn put(&self, collection: Collection, document: &Value) -> Result<SyncStatus> {
        with_store_context(
            self.cache.save(collection.as_str(), document),
            "write",
            collection.as_str(),
        )?;
        Ok(SyncStatus::Synced)
    }

    async fn patch(&self, collection: Collection, fields: &Value) -> Result<SyncStatus> {
        let mut document = self.get(collection).await?.unwrap_or(Value::Null);
        merge_fields(&mut document, fields);
        self.put(collection, &document).await
    }

    async fn delete(&self, collection: Collection) -> Result<SyncStatus> {
        with_store_context(self.cache.remove(collection.as_str()), "delete", collection.as_str())?;
        Ok(SyncStatus::Synced)
    }
}
