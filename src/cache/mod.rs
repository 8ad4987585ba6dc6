//! Persistent caching of price lookups

pub mod price_cache;

pub use price_cache::{PriceCache, PRICE_TTL_MS};
