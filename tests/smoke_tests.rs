use async_trait::async_trait;
use chrono::NaiveDate;
use scrapmap::config::{Config, DEFAULT_DATASET_URL, DEFAULT_TIMEZONE};
use scrapmap::error::ServiceResult;
use scrapmap::http::SiteStatus;
use scrapmap::sites::models::{RawSiteRecord, Site};
use scrapmap::sites::source::{DatasetSource, SocrataSource};
use scrapmap::sites::SiteDirectoryHandle;
use std::sync::Arc;
use std::time::Duration;

/// Smoke test to verify that a config can be built and validated
#[tokio::test]
async fn test_config_validates() {
    let config = Config {
        dataset_url: DEFAULT_DATASET_URL.to_string(),
        timezone: DEFAULT_TIMEZONE.to_string(),
        port: 3000,
        refresh_interval_secs: 900,
    };

    assert!(config.validate().is_ok());
    assert_eq!(config.site_timezone().unwrap().name(), "America/New_York");
}

/// Config with an unknown timezone must fail validation
#[tokio::test]
async fn test_config_rejects_invalid_timezone() {
    let config = Config {
        dataset_url: DEFAULT_DATASET_URL.to_string(),
        timezone: "Mars/Olympus_Mons".to_string(),
        port: 3000,
        refresh_interval_secs: 900,
    };

    assert!(config.validate().is_err());
}

/// Config with a malformed dataset URL must fail validation
#[tokio::test]
async fn test_config_rejects_invalid_url() {
    let config = Config {
        dataset_url: "not a url".to_string(),
        timezone: DEFAULT_TIMEZONE.to_string(),
        port: 3000,
        refresh_interval_secs: 900,
    };

    assert!(config.validate().is_err());
}

/// Dataset source with nothing in it, for handle smoke tests
struct EmptySource;

#[async_trait]
impl DatasetSource for EmptySource {
    async fn fetch_sites(&self) -> ServiceResult<Vec<Site>> {
        Ok(Vec::new())
    }
}

/// Smoke test for the site directory handle
#[tokio::test]
async fn test_directory_handle_creation() {
    let directory = SiteDirectoryHandle::new(Arc::new(EmptySource));

    // A fresh directory serves an empty, non-stale snapshot
    let snapshot = directory.snapshot().await.unwrap();
    assert!(snapshot.sites.is_empty());
    assert!(!snapshot.stale);
    assert!(snapshot.fetched_at.is_none());

    assert!(directory.shutdown().await.is_ok());
}

/// A stalled upstream fails the fetch once the client timeout elapses
#[tokio::test]
async fn test_fetch_times_out_on_stalled_upstream() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Accept connections but never answer them
    tokio::spawn(async move {
        let mut open = Vec::new();
        loop {
            if let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        }
    });

    let source =
        SocrataSource::with_timeout(format!("http://{}", addr), Duration::from_millis(250))
            .unwrap();

    let err = source.fetch_sites().await.unwrap_err();
    assert!(err.to_string().contains("Failed to fetch dataset"));
}

/// API view of a site carries the schedule fields plus the verdict
#[tokio::test]
async fn test_site_status_serialization() {
    let raw: RawSiteRecord = serde_json::from_str(
        r#"{
            "food_scrap_drop_off_site": "Astoria Pug",
            "address": "31-06 Astoria Blvd",
            "borough": "Queens",
            "open_months": "April through November",
            "operation_day_hours": "Every day 8am-6pm",
            "latitude": "40.770018",
            "longitude": "-73.917862"
        }"#,
    )
    .unwrap();
    let site = Site::from_raw(raw).unwrap();

    // Wednesday 2023-05-17 at 14:30, in season and inside the window
    let at = NaiveDate::from_ymd_opt(2023, 5, 17)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    let status = SiteStatus::from_site(&site, at);
    assert!(status.open_now);

    let value = serde_json::to_value(&status).unwrap();
    assert_eq!(value["name"], "Astoria Pug");
    assert_eq!(value["borough"], "Queens");
    assert_eq!(value["open_months"], "April through November");
    assert_eq!(value["open_now"], true);
    assert_eq!(value["hosted_by"], serde_json::Value::Null);
}
