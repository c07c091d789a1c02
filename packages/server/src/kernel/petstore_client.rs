//! Pet-store REST API client - upstream catalog lookups
//!
//! Errors are propagated to the caller; whether to substitute a fallback
//! (mock listing data, zero inventory) is the call site's decision, since
//! only the call site knows if it sits on a critical path.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error};

use super::{BasePetstoreApi, CatalogPet};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ApiCategory {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPet {
    name: Option<String>,
    category: Option<ApiCategory>,
    #[serde(default, rename = "photoUrls")]
    photo_urls: Vec<String>,
    status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PetstoreClient {
    base_url: String,
    client: reqwest::Client,
}

impl PetstoreClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BasePetstoreApi for PetstoreClient {
    async fn find_by_status(&self, status: &str) -> Result<Vec<CatalogPet>> {
        let url = format!("{}/pet/findByStatus?status={}", self.base_url, status);
        debug!(%url, "Fetching catalog pets by status");

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, status, "Pet-store findByStatus request failed");
                anyhow!("pet-store findByStatus request failed: {}", e)
            })?;

        if !response.status().is_success() {
            let http_status = response.status();
            error!(%http_status, "Pet-store findByStatus returned non-success");
            return Err(anyhow!("pet-store returned {}", http_status));
        }

        let pets: Vec<ApiPet> = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse pet-store findByStatus response");
            anyhow!("failed to parse pet-store response: {}", e)
        })?;

        Ok(pets
            .into_iter()
            .map(|p| CatalogPet {
                name: p.name.unwrap_or_default(),
                category: p.category.and_then(|c| c.name),
                photo_urls: p.photo_urls,
                status: p.status.unwrap_or_default(),
            })
            .collect())
    }

    async fn store_inventory(&self) -> Result<HashMap<String, i64>> {
        let url = format!("{}/store/inventory", self.base_url);
        debug!(%url, "Fetching store inventory");

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Store inventory request failed");
                anyhow!("store inventory request failed: {}", e)
            })?;

        if !response.status().is_success() {
            return Err(anyhow!("pet-store returned {}", response.status()));
        }

        response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse store inventory response");
            anyhow!("failed to parse store inventory response: {}", e)
        })
    }
}
