use crate::schedule::{self, SiteSchedule};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// One raw row of the public drop-off site dataset
///
/// Socrata serves every value as a string and omits keys with no value, so
/// every field is optional here. Unrecognized keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSiteRecord {
    pub food_scrap_drop_off_site: Option<String>,
    pub address: Option<String>,
    pub borough: Option<String>,
    pub hosted_by: Option<String>,
    pub notes: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub open_months: Option<String>,
    pub operation_day_hours: Option<String>,
}

/// A validated drop-off site with usable coordinates
#[derive(Debug, Clone)]
pub struct Site {
    pub name: Option<String>,
    pub address: Option<String>,
    pub borough: Option<String>,
    pub hosted_by: Option<String>,
    pub notes: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub schedule: SiteSchedule,
}

impl Site {
    /// Convert a raw record, dropping it when the coordinates are unusable
    pub fn from_raw(raw: RawSiteRecord) -> Option<Self> {
        let latitude = parse_coordinate(raw.latitude.as_deref())?;
        let longitude = parse_coordinate(raw.longitude.as_deref())?;

        Some(Self {
            name: raw.food_scrap_drop_off_site,
            address: raw.address,
            borough: raw.borough,
            hosted_by: raw.hosted_by,
            notes: raw.notes,
            latitude,
            longitude,
            schedule: SiteSchedule::new(raw.open_months, raw.operation_day_hours),
        })
    }

    /// Whether the site is open at the given local instant
    pub fn is_open_at(&self, at: NaiveDateTime) -> bool {
        schedule::is_open_now(&self.schedule, at)
    }
}

/// The directory's view of the dataset at one point in time
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    /// Validated sites from the last successful fetch
    pub sites: Vec<Site>,
    /// When the sites were last fetched successfully
    pub fetched_at: Option<DateTime<Utc>>,
    /// Whether the most recent refresh attempt failed
    pub stale: bool,
}

/// Parse a coordinate string, rejecting missing and non-finite values
fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    let parsed = value?.trim().parse::<f64>().ok()?;
    if parsed.is_finite() {
        Some(parsed)
    } else {
        None
    }
}
