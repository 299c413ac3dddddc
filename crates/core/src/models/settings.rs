use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Environment variable overriding `api_base_url`.
pub const ENV_API_URL: &str = "ENERGY_MARKETPLACE_API_URL";
/// Environment variable overriding `request_timeout_secs`.
pub const ENV_TIMEOUT_SECS: &str = "ENERGY_MARKETPLACE_TIMEOUT_SECS";
/// Environment variable overriding `page_size`.
pub const ENV_PAGE_SIZE: &str = "ENERGY_MARKETPLACE_PAGE_SIZE";
/// Environment variable overriding `market_sample_size`.
pub const ENV_SAMPLE_SIZE: &str = "ENERGY_MARKETPLACE_SAMPLE_SIZE";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the marketplace API, without a trailing slash
    pub api_base_url: String,

    /// Per-request timeout (ignored on wasm32, where the browser owns timeouts)
    pub request_timeout_secs: u64,

    /// Default listing page size
    pub page_size: u64,

    /// How many Available contracts the market statistics are computed over.
    /// The listing service caps a page at 100.
    pub market_sample_size: u64,

    /// How many portfolio items the dashboard lists as recent additions
    pub recent_items: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            page_size: 20,
            market_sample_size: 100,
            recent_items: 3,
        }
    }
}

impl Settings {
    /// Defaults overlaid with any `ENERGY_MARKETPLACE_*` environment variables.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(url) = lookup(ENV_API_URL) {
            settings.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            settings.request_timeout_secs = parse_number(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            settings.page_size = parse_number(ENV_PAGE_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SAMPLE_SIZE) {
            settings.market_sample_size = parse_number(ENV_SAMPLE_SIZE, &raw)?;
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        if self.page_size == 0 {
            return Err(CoreError::Config("page_size must be positive".into()));
        }
        if self.market_sample_size == 0 {
            return Err(CoreError::Config("market_sample_size must be positive".into()));
        }
        Ok(())
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::Config(format!("{key} must be a non-negative integer, got '{raw}'")))
}
