use super::models::{RawSiteRecord, Site};
use crate::error::{dataset_error, ServiceResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Upper bound on a single dataset request; a stalled upstream fails the
/// refresh instead of blocking the directory actor
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where site records come from
///
/// The trait is the seam that lets tests run the directory against an
/// in-memory source instead of the network.
#[async_trait]
pub trait DatasetSource: Send + Sync + 'static {
    /// Fetch the dataset and return the validated site list
    async fn fetch_sites(&self) -> ServiceResult<Vec<Site>>;
}

/// Dataset source backed by the public Socrata endpoint
pub struct SocrataSource {
    client: Client,
    url: String,
}

impl SocrataSource {
    pub fn new(url: String) -> ServiceResult<Self> {
        Self::with_timeout(url, FETCH_TIMEOUT)
    }

    /// Build a source with a custom request timeout
    pub fn with_timeout(url: String, timeout: Duration) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| dataset_error(&format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl DatasetSource for SocrataSource {
    async fn fetch_sites(&self) -> ServiceResult<Vec<Site>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| dataset_error(&format!("Failed to fetch dataset: {}", e)))?;

        if !response.status().is_success() {
            return Err(dataset_error(&format!(
                "Dataset request failed: HTTP {}",
                response.status()
            )));
        }

        let records: Vec<RawSiteRecord> = response
            .json()
            .await
            .map_err(|e| dataset_error(&format!("Failed to parse dataset JSON: {}", e)))?;

        Ok(keep_usable_sites(records))
    }
}

/// Validate raw records, dropping those without usable coordinates
pub fn keep_usable_sites(records: Vec<RawSiteRecord>) -> Vec<Site> {
    let total = records.len();
    let sites: Vec<Site> = records.into_iter().filter_map(Site::from_raw).collect();

    if sites.len() < total {
        debug!(
            "Dropped {} records with unusable coordinates",
            total - sites.len()
        );
    }

    sites
}
