//! Price enrichment of search results

pub mod book;
pub mod pipeline;
pub mod resolver;

pub use book::{observed_ceiling, PriceBook, PriceRange, MIN_CEILING};
pub use pipeline::{EnrichmentOutcome, EnrichmentPipeline, DEFAULT_THROTTLE};
pub use resolver::{MarketplaceResolver, PriceResolver, ReleaseLowestResolver, ResolverChain};
