use std::time::Duration;
use thiserror::Error;
use tracing::info;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_UPLOAD_NOTICE_MS: u64 = 3000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a number of milliseconds, got `{value}`")]
    InvalidDuration { name: &'static str, value: String },
    #[error("{name} must be an http(s) URL, got `{value}`")]
    InvalidUrl { name: &'static str, value: String },
}

/// Application configuration
/// In debug builds: loads a .env file first, then reads the environment
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base address of the photo service, e.g. `http://localhost:5000/api`
    pub api_base_url: String,
    /// How long an upload summary stays on screen
    pub upload_notice_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            upload_notice_delay: Duration::from_millis(DEFAULT_UPLOAD_NOTICE_MS),
        }
    }
}

impl Config {
    /// Load configuration based on build mode
    pub fn load() -> Result<Self, ConfigError> {
        #[cfg(debug_assertions)]
        {
            if dotenvy::dotenv().is_ok() {
                info!("Config: Dev mode activated - loaded .env file");
            } else {
                info!("Config: No .env file found, using environment only");
            }
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup (the process environment in `load`)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(url) = lookup("PHOTO_ORGANIZER_API_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    name: "PHOTO_ORGANIZER_API_URL",
                    value: url,
                });
            }
            config.api_base_url = url;
        }

        if let Some(value) = lookup("PHOTO_ORGANIZER_UPLOAD_NOTICE_MS") {
            let ms = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDuration {
                    name: "PHOTO_ORGANIZER_UPLOAD_NOTICE_MS",
                    value: value.clone(),
                })?;
            config.upload_notice_delay = Duration::from_millis(ms);
        }

        info!("Config: Using photo service at {}", config.api_base_url);
        Ok(config)
    }
}
