//! Request and response types for the HTTP API.

use crate::sites::models::Site;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok", "stale", or an error description
    pub status: String,
    /// Number of sites in the current snapshot
    pub site_count: usize,
    /// When the dataset was last fetched successfully
    pub last_refresh: Option<DateTime<Utc>>,
    /// Whether the most recent refresh attempt failed
    pub stale: bool,
}

/// Query parameters for the site listing endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SitesQuery {
    /// Evaluation instant override; defaults to the current local time
    #[serde(default)]
    pub at: Option<String>,
}

/// One site with its schedule evaluated at the requested instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteStatus {
    pub name: Option<String>,
    pub address: Option<String>,
    pub borough: Option<String>,
    pub hosted_by: Option<String>,
    pub notes: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub open_months: Option<String>,
    pub operation_day_hours: Option<String>,
    pub open_now: bool,
}

impl SiteStatus {
    /// Build the API view of a site, evaluating its schedule at `at`
    pub fn from_site(site: &Site, at: NaiveDateTime) -> Self {
        Self {
            name: site.name.clone(),
            address: site.address.clone(),
            borough: site.borough.clone(),
            hosted_by: site.hosted_by.clone(),
            notes: site.notes.clone(),
            latitude: site.latitude,
            longitude: site.longitude,
            open_months: site.schedule.open_months.clone(),
            operation_day_hours: site.schedule.operation_day_hours.clone(),
            open_now: site.is_open_at(at),
        }
    }
}

/// Response for the site listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteListResponse {
    pub sites: Vec<SiteStatus>,
    pub total: usize,
    /// Local instant the schedules were evaluated at
    pub evaluated_at: NaiveDateTime,
}
