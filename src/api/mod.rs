//! Discogs API client (search, release detail, marketplace pricing)

mod client;
pub mod marketplace;
mod releases;
mod search;

pub use client::{DiscogsClient, DEFAULT_BASE_URL};
pub use marketplace::{estimate_from_stats, estimate_from_suggestions, PREFERRED_CONDITIONS};
