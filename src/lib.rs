pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod pricing;
pub mod projection;
pub mod session;

// Re-export commonly used items
pub use api::DiscogsClient;
pub use cache::{PriceCache, PRICE_TTL_MS};
pub use catalog::{Catalog, RecordDetail, SearchView, DEFAULT_PER_PAGE};
pub use config::Config;
pub use error::{CatalogError, Result};
pub use models::{MarketStats, PriceEstimate, PriceSource, Release, SearchResult};
pub use pricing::{EnrichmentOutcome, EnrichmentPipeline, PriceBook, PriceRange, ResolverChain};
pub use projection::{EnrichedResult, FilterState, QuickRange, SortOption};
pub use session::{SessionToken, SessionTracker};
