use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;

use super::{merge_fields, DocumentStore, SyncStatus};
use crate::cache::Cache;
use crate::config::StoreSettings;
use crate::domain::Collection;
use crate::errors::with_store_context;
use crate::http::DocumentClient;

/// Hosted JSON database mirrored into a local cache.
///
/// Reads refresh the cache and fall back to it when the remote cannot be
/// reached or answers with garbage. Writes always land in the cache first, so
/// a failed upload leaves the local copy current.
pub struct RemoteStore {
    client: DocumentClient,
    cache: Cache,
    base_url: String,
}

impl RemoteStore {
    pub fn new(settings: &StoreSettings) -> Result<Self> {
        let base_url = settings
            .remote_url
            .clone()
            .context("Remote store URL is not configured")?;
        let client = DocumentClient::new(&base_url, settings.user_agent, settings.timeout_secs)?;

        Ok(Self {
            client,
            cache: Cache::new(&settings.data_dir)?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn cache_key(collection: Collection) -> String {
        format!("{}_cache", collection.as_str())
    }

    fn load_cached(&self, collection: Collection) -> Result<Option<Value>> {
        with_store_context(
            self.cache.load(&Self::cache_key(collection)),
            "read cached",
            collection.as_str(),
        )
    }

    fn save_cached(&self, collection: Collection, document: &Value) -> Result<()> {
        with_store_context(
            self.cache.save(&Self::cache_key(collection), document),
            "cache",
            collection.as_str(),
        )
    }
}

impl DocumentStore for RemoteStore {
    async fn get(&self, collection: Collection) -> Result<Option<Value>> {
        match self.client.get(collection.as_str()).await {
            Ok(Value::Null) => Ok(None),
            Ok(document) => {
                if let Err(e) = self.save_cached(collection, &document) {
                    warn!("Could not refresh local copy of {}: {:?}", collection, e);
                }
                Ok(Some(document))
            }
            Err(e) => {
                warn!("Remote read of {} failed, using local copy: {:#}", collection, e);
                self.load_cached(collection)
            }
        }
    }

    async fn put(&self, collection: Collection, document: &Value) -> Result<SyncStatus> {
        self.save_cached(collection, document)?;

        match self.client.put(collection.as_str(), document).await {
            Ok(()) => {
                info!("Uploaded {}", collection);
                Ok(SyncStatus::Synced)
            }
            Err(e) => {
                warn!("Remote write of {} failed, kept locally: {:#}", collection, e);
                Ok(SyncStatus::LocalOnly)
            }
        }
    }

    async fn patch(&self, collection: Collection, fields: &Value) -> Result<SyncStatus> {
        let status = match self.client.patch(collection.as_str(), fields).await {
            Ok(()) => SyncStatus::Synced,
            Err(e) => {
                warn!("Remote patch of {} failed, applied locally: {:#}", collection, e);
                SyncStatus::LocalOnly
            }
        };

        let mut document = self.load_cached(collection)?.unwrap_or(Value::Null);
        merge_fields(&mut document, fields);
        self.save_cached(collection, &document)?;
        Ok(status)
    }

    async fn delete(&self, collection: Collection) -> Result<SyncStatus> {
        with_store_context(
            self.cache.remove(&Self::cache_key(collection)),
            "delete cached",
            collection.as_str(),
        )?;

        match self.client.delete(collection.as_str()).await {
            Ok(()) => Ok(SyncStatus::Synced),
            Err(e) => {
                warn!("Remote delete of {} failed: {:#}", collection, e);
                Ok(SyncStatus::LocalOnly)
            }
        }
    }
}
