//! Configuration module for the field operations console.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ClientError;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend REST API, always ending in `/`
    pub api_base_url: String,
    /// Bearer token sent in the `Authorization` header
    pub api_token: Option<String>,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Where the view-preferences blob is cached between sessions
    pub prefs_path: PathBuf,
    /// Team filter token applied by the binary (`all`, `coordinator`, `avp-<id>`, ...)
    pub team_filter: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let api_base_url = normalize_base_url(
            &env::var("FIELDOPS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        );

        let api_token = env::var("FIELDOPS_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let request_timeout = match env::var("FIELDOPS_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    ClientError::Config(format!("Invalid FIELDOPS_REQUEST_TIMEOUT_SECS: {}", raw))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let prefs_path = env::var("FIELDOPS_PREFS_PATH")
            .unwrap_or_else(|_| "./data/view-prefs.json".to_string())
            .into();

        let team_filter = env::var("FIELDOPS_TEAM_FILTER").unwrap_or_else(|_| "all".to_string());

        let log_level = env::var("FIELDOPS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api_base_url,
            api_token,
            request_timeout,
            prefs_path,
            team_filter,
            log_level,
        })
    }

    /// Configuration pointing at an explicit base URL, everything else defaulted.
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(base_url),
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            prefs_path: "./data/view-prefs.json".into(),
            team_filter: "all".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Relative endpoint paths are joined onto the base, so it must end in `/`.
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
