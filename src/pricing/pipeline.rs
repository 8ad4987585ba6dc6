//! Sequential price enrichment.
//!
//! Items are processed strictly one after another, each followed by a fixed
//! delay, so the upstream rate limit is never hit by a burst of lookups.

use crate::cache::PriceCache;
use crate::models::{PriceEstimate, SearchResult};
use crate::pricing::book::{observed_ceiling, PriceBook, PriceRange};
use crate::pricing::resolver::ResolverChain;
use crate::session::SessionToken;
use std::sync::Arc;
use std::time::Duration;

/// Pause after each item, cached or not
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(150);

/// How an enrichment run ended
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentOutcome {
    /// Every item was resolved and the price range published
    Completed(PriceRange),
    /// A newer session started; `committed` items had been recorded before that
    Cancelled { committed: usize },
}

pub struct EnrichmentPipeline {
    chain: ResolverChain,
    cache: Arc<PriceCache>,
    throttle: Duration,
}

impl EnrichmentPipeline {
    pub fn new(chain: ResolverChain, cache: Arc<PriceCache>) -> Self {
        Self {
            chain,
            cache,
            throttle: DEFAULT_THROTTLE,
        }
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn throttle(&self) -> Duration {
        self.throttle
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    /// Cached estimate if fresh, otherwise the resolver chain's answer (which is then cached).
    ///
    /// Priceless answers are cached too, so failing lookups are not repeated every session.
    pub async fn resolve_one(&self, id: u64) -> PriceEstimate {
        if let Some(estimate) = self.cache.read(id) {
            log::debug!("Price cache hit for {}", id);
            return estimate;
        }

        log::debug!("Price cache miss for {}, resolving", id);
        let estimate = self.chain.resolve(id).await;
        self.cache.write(id, &estimate);
        estimate
    }

    /// Resolves prices for `results` in order, recording them in `book`.
    ///
    /// The token is checked before each lookup and before each commit; once it
    /// goes stale nothing more is written to `book` and the range stays unpublished.
    pub async fn run(
        &self,
        results: &[SearchResult],
        token: &SessionToken,
        book: &mut PriceBook,
    ) -> EnrichmentOutcome {
        book.unpublish();
        log::info!("Enriching {} results with prices", results.len());

        for (committed, result) in results.iter().enumerate() {
            if !token.is_current() {
                return cancelled(committed);
            }

            let estimate = self.resolve_one(result.id).await;

            if !token.is_current() {
                return cancelled(committed);
            }
            book.insert(result.id, estimate);

            tokio::time::sleep(self.throttle).await;
        }

        if !token.is_current() {
            return cancelled(results.len());
        }

        let ceiling = observed_ceiling(results.iter().filter_map(|r| book.price_of(r.id)));
        let range = PriceRange::up_to(ceiling);
        book.publish(range.clone());

        log::info!(
            "Price enrichment complete: {} of {} priced, ceiling {}",
            results.iter().filter(|r| book.price_of(r.id).is_some()).count(),
            results.len(),
            ceiling
        );
        EnrichmentOutcome::Completed(range)
    }
}

fn cancelled(committed: usize) -> EnrichmentOutcome {
    log::info!(
        "Price enrichment abandoned after {} items: a newer search started",
        committed
    );
    EnrichmentOutcome::Cancelled { committed }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
