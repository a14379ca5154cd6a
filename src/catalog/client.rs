//! Async HTTP client for the traits endpoint
//!
//! One GET per character-creation session. A failed fetch is not fatal:
//! `fetch_or_empty` downgrades to an empty catalog so the session starts
//! with empty buckets instead of blocking character creation.

use crate::catalog::document::TraitCatalog;
use crate::core::config::ClientConfig;
use crate::core::error::{ForgeError, Result};
use reqwest::Client;
use std::time::Duration;

/// Async client fetching the trait catalog for one shard
pub struct CatalogClient {
    client: Client,
    api_url: String,
    shard_id: u32,
}

impl CatalogClient {
    /// Create a client with explicit configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ForgeError::FetchError(e.to_string()))?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            shard_id: config.shard_id,
        })
    }

    /// Create a client from environment variables (see ClientConfig::from_env)
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// The URL this client fetches
    pub fn endpoint(&self) -> String {
        format!("{}v1/traits?shardID={}", self.api_url, self.shard_id)
    }

    /// Fetch the trait catalog for the configured shard
    pub async fn fetch_traits(&self) -> Result<TraitCatalog> {
        let url = self.endpoint();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ForgeError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ForgeError::FetchError(format!(
                "traits endpoint returned {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ForgeError::FetchError(e.to_string()))
    }

    /// Fetch the catalog, downgrading any failure to an empty catalog
    pub async fn fetch_or_empty(&self) -> TraitCatalog {
        match self.fetch_traits().await {
            Ok(catalog) => {
                tracing::info!("Fetched trait catalog: {} traits", catalog.traits.len());
                catalog
            }
            Err(e) => {
                tracing::warn!("Trait fetch failed, starting with empty catalog: {}", e);
                TraitCatalog::default()
            }
        }
    }
}
