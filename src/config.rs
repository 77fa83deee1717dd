//! Service endpoints and credentials, with environment overrides.

use std::time::Duration;

use tracing::{info, warn};

/// Collection search endpoint of the Rijksmuseum API.
pub const DEFAULT_RIJKS_URL: &str = "https://www.rijksmuseum.nl/api/en/collection";
/// Public demo key for the collection API.
pub const DEFAULT_RIJKS_KEY: &str = "DnPSEVZA";
/// Colormind palette endpoint.
pub const DEFAULT_COLORMIND_URL: &str = "http://colormind.io/api/";
/// Request timeout applied to both services.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

const RIJKS_URL_ENV: &str = "POSTFUL_RIJKS_URL";
const RIJKS_KEY_ENV: &str = "POSTFUL_RIJKS_KEY";
const COLORMIND_URL_ENV: &str = "POSTFUL_COLORMIND_URL";
const HTTP_TIMEOUT_ENV: &str = "POSTFUL_HTTP_TIMEOUT_SECS";

/// Runtime configuration for the two remote services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostfulConfig {
    pub rijks_url: String,
    pub rijks_key: String,
    pub colormind_url: String,
    pub http_timeout: Duration,
}

impl Default for PostfulConfig {
    fn default() -> Self {
        Self {
            rijks_url: DEFAULT_RIJKS_URL.to_string(),
            rijks_key: DEFAULT_RIJKS_KEY.to_string(),
            colormind_url: DEFAULT_COLORMIND_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl PostfulConfig {
    /// Construct a configuration pointing at explicit endpoints.
    pub fn new(rijks_url: impl Into<String>, colormind_url: impl Into<String>) -> Self {
        Self {
            rijks_url: rijks_url.into(),
            colormind_url: colormind_url.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by whichever `POSTFUL_*` variables are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(RIJKS_URL_ENV) {
            config.rijks_url = url;
        }
        if let Some(key) = lookup(RIJKS_KEY_ENV) {
            config.rijks_key = key;
        }
        if let Some(url) = lookup(COLORMIND_URL_ENV) {
            config.colormind_url = url;
        }
        if let Some(raw) = lookup(HTTP_TIMEOUT_ENV) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.http_timeout = Duration::from_secs(secs),
                _ => warn!(
                    value = %raw,
                    "ignoring invalid {HTTP_TIMEOUT_ENV}; keeping default timeout"
                ),
            }
        }
        info!(
            rijks = %config.rijks_url,
            colormind = %config.colormind_url,
            timeout_secs = config.http_timeout.as_secs(),
            "resolved service configuration"
        );
        config
    }
}
