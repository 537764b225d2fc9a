//! Catalog client settings

use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const GOOGLE_BOOKS_API: &str = "https://www.googleapis.com/books/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_RESULTS: u32 = 20;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_results: u32,
    pub debounce_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: GOOGLE_BOOKS_API.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_results: DEFAULT_MAX_RESULTS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl CatalogConfig {
    /// Defaults with the base URL and timeout overridable through
    /// `BOOK_SEARCH_BASE_URL` and `BOOK_SEARCH_TIMEOUT_SECS`. Result count
    /// and debounce stay fixed.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Self::builder()?
            .add_source(Environment::with_prefix("BOOK_SEARCH").try_parsing(true))
            .build()?;
        Self::from_settings(&settings)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("base_url", GOOGLE_BOOKS_API)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)
    }

    fn from_settings(settings: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: settings.get_string("base_url")?,
            timeout_secs: settings.get::<u64>("timeout_secs")?,
            ..Self::default()
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
