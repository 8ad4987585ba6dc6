//! Price resolver strategies and the ordered chain that evaluates them

use crate::api::DiscogsClient;
use crate::models::PriceEstimate;
use async_trait::async_trait;
use std::sync::Arc;

/// One way of obtaining a price estimate for a release.
///
/// Resolvers never fail: anything that goes wrong is logged and reported as `None`.
#[async_trait]
pub trait PriceResolver: Send + Sync {
    async fn resolve(&self, release_id: u64) -> Option<PriceEstimate>;

    /// Resolver name for logging
    fn name(&self) -> &'static str;
}

/// Marketplace price suggestions, falling back to marketplace stats
pub struct MarketplaceResolver {
    client: Arc<DiscogsClient>,
}

impl MarketplaceResolver {
    pub fn new(client: Arc<DiscogsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PriceResolver for MarketplaceResolver {
    async fn resolve(&self, release_id: u64) -> Option<PriceEstimate> {
        match self.client.price_estimate(release_id).await {
            Ok(estimate) => estimate,
            Err(e) => {
                log::warn!("Marketplace estimate failed for {}: {}", release_id, e);
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "marketplace"
    }
}

/// The release record's `lowest_price`, as a one-point estimate
pub struct ReleaseLowestResolver {
    client: Arc<DiscogsClient>,
}

impl ReleaseLowestResolver {
    pub fn new(client: Arc<DiscogsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PriceResolver for ReleaseLowestResolver {
    async fn resolve(&self, release_id: u64) -> Option<PriceEstimate> {
        match self.client.release(release_id).await {
            Ok(release) => release.lowest_price.map(PriceEstimate::release_lowest),
            Err(e) => {
                log::debug!("Release lookup failed for {}: {}", release_id, e);
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "release_lowest"
    }
}

/// Ordered list of resolvers, consulted until one yields a priced estimate
pub struct ResolverChain {
    resolvers: Vec<Box<dyn PriceResolver>>,
}

impl ResolverChain {
    pub fn new(resolvers: Vec<Box<dyn PriceResolver>>) -> Self {
        Self { resolvers }
    }

    /// Marketplace estimate first, then the release's lowest price
    pub fn standard(client: Arc<DiscogsClient>) -> Self {
        Self::new(vec![
            Box::new(MarketplaceResolver::new(Arc::clone(&client))),
            Box::new(ReleaseLowestResolver::new(client)),
        ])
    }

    /// Runs the chain for one release.
    ///
    /// Returns the first estimate with a numeric field. If none has one, the
    /// first (priceless) estimate any resolver produced is returned instead,
    /// and an empty estimate if nothing was produced at all.
    pub async fn resolve(&self, release_id: u64) -> PriceEstimate {
        let mut fallback: Option<PriceEstimate> = None;

        for resolver in &self.resolvers {
            match resolver.resolve(release_id).await {
                Some(estimate) if estimate.has_price() => {
                    log::debug!("Price for {} resolved by {}", release_id, resolver.name());
                    return estimate;
                }
                Some(estimate) => {
                    log::debug!(
                        "{} returned no price for {}, trying next",
                        resolver.name(),
                        release_id
                    );
                    fallback.get_or_insert(estimate);
                }
                None => {
                    log::debug!("{} had nothing for {}", resolver.name(), release_id);
                }
            }
        }

        fallback.unwrap_or_default()
    }
}
