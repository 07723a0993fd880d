use crate::error::{config_error, env_error, ServiceResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::warn;
use url::Url;

/// Socrata endpoint for the NYC food scrap drop-off site dataset
pub const DEFAULT_DATASET_URL: &str = "https://data.cityofnewyork.us/resource/if26-z6xq.json";

/// Timezone the dataset's schedule texts are written in
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Default port for the JSON API
const DEFAULT_PORT: u16 = 3000;

/// Default seconds between dataset refreshes
const DEFAULT_REFRESH_INTERVAL: u64 = 900;

/// Main configuration structure for the service
#[derive(Debug, Clone)]
pub struct Config {
    /// URL the site records are fetched from
    pub dataset_url: String,
    /// Timezone used to localize "now" before evaluating schedules
    pub timezone: String,
    /// Port the JSON API listens on
    pub port: u16,
    /// Seconds between dataset refreshes
    pub refresh_interval_secs: u64,
}

/// Optional overrides read from config/scrapmap.toml
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    dataset_url: Option<String>,
    timezone: Option<String>,
    port: Option<u16>,
    refresh_interval_secs: Option<u64>,
}

/// Raw values read from the process environment
#[derive(Debug, Default)]
struct EnvOverrides {
    dataset_url: Option<String>,
    timezone: Option<String>,
    port: Option<String>,
    refresh_interval: Option<String>,
}

impl EnvOverrides {
    fn from_process() -> Self {
        Self {
            dataset_url: env::var("DATASET_URL").ok(),
            timezone: env::var("TIMEZONE").ok(),
            port: env::var("PORT").ok(),
            refresh_interval: env::var("REFRESH_INTERVAL").ok(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    ///
    /// Every key is optional; environment variables win over the config file,
    /// which wins over the built-in defaults.
    pub fn load() -> ServiceResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        Self::merge(EnvOverrides::from_process(), load_file_overrides())
    }

    /// Resolve each key from the environment, then the file, then the default
    fn merge(env: EnvOverrides, file: FileOverrides) -> ServiceResult<Self> {
        let dataset_url = env
            .dataset_url
            .or(file.dataset_url)
            .unwrap_or_else(|| DEFAULT_DATASET_URL.to_string());

        let timezone = env
            .timezone
            .or(file.timezone)
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

        // Parse numeric values, failing fast on malformed environment input
        let port = match env.port {
            Some(raw) => raw.parse::<u16>().map_err(|_| env_error("PORT"))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let refresh_interval_secs = match env.refresh_interval {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| env_error("REFRESH_INTERVAL"))?,
            None => file.refresh_interval_secs.unwrap_or(DEFAULT_REFRESH_INTERVAL),
        };

        let config = Config {
            dataset_url,
            timezone,
            port,
            refresh_interval_secs,
        };
        config.validate()?;

        Ok(config)
    }

    /// Check that the dataset URL and timezone parse before anything uses them
    pub fn validate(&self) -> ServiceResult<()> {
        Url::parse(&self.dataset_url).map_err(|e| {
            config_error(&format!("Invalid dataset URL {}: {}", self.dataset_url, e))
        })?;
        self.site_timezone()?;
        Ok(())
    }

    /// The configured timezone, parsed
    pub fn site_timezone(&self) -> ServiceResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Invalid timezone: {}", self.timezone)))
    }
}

/// Read config/scrapmap.toml if it exists; a malformed file is skipped
fn load_file_overrides() -> FileOverrides {
    match fs::read_to_string("config/scrapmap.toml") {
        Ok(content) => match toml::from_str(&content) {
            Ok(overrides) => overrides,
            Err(e) => {
                warn!("Ignoring malformed config/scrapmap.toml: {}", e);
                FileOverrides::default()
            }
        },
        Err(_) => FileOverrides::default(),
    }
}
