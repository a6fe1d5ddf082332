use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// JSON-over-REST client for a hosted document database
pub struct DocumentClient {
    client: Client,
    base_url: String,
}

impl DocumentClient {
    pub fn new(base_url: &str, user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Document at `path`; the store answers `null` for absent documents.
    pub async fn get(&self, path: &str) -> Result<Value> {
        let url = self.build_url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send GET request")?
            .error_for_status()
            .with_context(|| format!("GET {} returned an error status", url))?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to decode JSON from {}", url))
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<()> {
        let url = self.build_url(path);
        self.client
            .put(&url)
            .json(body)
            .send()
            .await
            .context("Failed to send PUT request")?
            .error_for_status()
            .with_context(|| format!("PUT {} returned an error status", url))?;
        Ok(())
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<()> {
        let url = self.build_url(path);
        self.client
            .patch(&url)
            .json(body)
            .send()
            .await
            .context("Failed to send PATCH request")?
            .error_for_status()
            .with_context(|| format!("PATCH {} returned an error status", url))?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.build_url(path);
        self.client
            .delete(&url)
            .send()
            .await
            .context("Failed to send DELETE request")?
            .error_for_status()
            .with_context(|| format!("DELETE {} returned an error status", url))?;
        Ok(())
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path.trim_matches('/'))
    }
}
