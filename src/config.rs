//! Runtime configuration and wiring of client, cache and pipeline

use crate::api::{DiscogsClient, DEFAULT_BASE_URL};
use crate::cache::PriceCache;
use crate::catalog::{Catalog, DEFAULT_PER_PAGE};
use crate::pricing::{EnrichmentPipeline, ResolverChain, DEFAULT_THROTTLE};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Environment variable holding the Discogs access token
pub const TOKEN_ENV: &str = "DISCOGS_TOKEN";
/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "DISCOGS_BASE_URL";
/// Environment variable overriding the price cache database path
pub const CACHE_DB_ENV: &str = "VINYL_CACHE_DB";

#[derive(Debug, Clone)]
pub struct Config {
    /// Access token; absence is reported by the client before any request
    pub token: Option<String>,
    pub base_url: String,
    /// Price cache database; `None` disables caching
    pub cache_path: Option<PathBuf>,
    pub throttle: Duration,
    pub per_page: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_path: Some(PriceCache::default_path()),
            throttle: DEFAULT_THROTTLE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Config {
    /// Builds the catalog service. A cache that cannot be opened is skipped.
    pub fn build_catalog(&self) -> Catalog {
        let client = Arc::new(DiscogsClient::with_base_url(
            self.token.clone(),
            self.base_url.clone(),
        ));
        if !client.has_token() {
            log::warn!("{} not set; catalog requests will fail", TOKEN_ENV);
        }

        let cache = match &self.cache_path {
            Some(path) => PriceCache::open_or_disabled(path),
            None => {
                log::info!("Price cache disabled");
                PriceCache::disabled()
            }
        };

        let pipeline =
            EnrichmentPipeline::new(ResolverChain::standard(Arc::clone(&client)), Arc::new(cache))
                .with_throttle(self.throttle);
        Catalog::with_pipeline(client, pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.token.is_none());
        assert_eq!(config.base_url, "https://api.discogs.com");
        assert_eq!(config.throttle, Duration::from_millis(150));
        assert_eq!(config.per_page, 12);
        assert!(config
            .cache_path
            .as_ref()
            .is_some_and(|p| p.ends_with("vinyl_catalog/price_cache.db")));
    }

    #[test]
    fn build_catalog_without_cache() {
        let config = Config {
            token: Some("abc".to_string()),
            cache_path: None,
            throttle: Duration::ZERO,
            ..Config::default()
        };
        let catalog = config.build_catalog();
        assert!(catalog.client().has_token());
        assert!(!catalog.pipeline().cache().is_enabled());
        assert_eq!(catalog.pipeline().throttle(), Duration::ZERO);
    }

    #[test]
    fn build_catalog_opens_cache_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.db");
        let config = Config {
            cache_path: Some(path.clone()),
            ..Config::default()
        };

        let catalog = config.build_catalog();
        assert!(catalog.pipeline().cache().is_enabled());
        assert!(path.exists());
    }
}
