//! Catalog service: search sessions, price enrichment and record detail

use crate::api::DiscogsClient;
use crate::cache::PriceCache;
use crate::error::Result;
use crate::models::{MarketStats, Pagination, PriceEstimate, Release, SearchResult};
use crate::pricing::{EnrichmentOutcome, EnrichmentPipeline, PriceBook, ResolverChain};
use crate::projection::{project, EnrichedResult, FilterState, SortOption};
use crate::session::{SessionToken, SessionTracker};
use std::sync::Arc;

/// Default number of results per search page
pub const DEFAULT_PER_PAGE: u32 = 12;

/// One page of search results together with its price state
#[derive(Debug)]
pub struct SearchView {
    pub query: String,
    pub page: u32,
    pub results: Vec<SearchResult>,
    pub pagination: Pagination,
    pub prices: PriceBook,
    token: SessionToken,
}

impl SearchView {
    /// Results with display prices, filtered and sorted
    pub fn project(&self, filter: &FilterState, sort: SortOption) -> Vec<EnrichedResult> {
        project(&self.results, &self.prices, filter, sort)
    }

    /// False once a newer search has started
    pub fn is_current(&self) -> bool {
        self.token.is_current()
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }
}

/// Release detail with optional marketplace statistics
#[derive(Debug, Clone)]
pub struct RecordDetail {
    pub release: Release,
    pub stats: Option<MarketStats>,
}

pub struct Catalog {
    client: Arc<DiscogsClient>,
    pipeline: EnrichmentPipeline,
    sessions: SessionTracker,
}

impl Catalog {
    /// Catalog with the standard resolver chain and default throttle
    pub fn new(client: Arc<DiscogsClient>, cache: Arc<PriceCache>) -> Self {
        let pipeline = EnrichmentPipeline::new(ResolverChain::standard(Arc::clone(&client)), cache);
        Self::with_pipeline(client, pipeline)
    }

    pub fn with_pipeline(client: Arc<DiscogsClient>, pipeline: EnrichmentPipeline) -> Self {
        Self {
            client,
            pipeline,
            sessions: SessionTracker::new(),
        }
    }

    pub fn client(&self) -> &DiscogsClient {
        &self.client
    }

    pub fn pipeline(&self) -> &EnrichmentPipeline {
        &self.pipeline
    }

    pub fn sessions(&self) -> &SessionTracker {
        &self.sessions
    }

    /// Runs a search in a new session, invalidating any enrichment still in flight.
    ///
    /// A failed search returns the error and no results.
    pub async fn search(&self, term: &str, page: u32, per_page: u32) -> Result<SearchView> {
        let token = self.sessions.begin();
        let term = term.trim();
        let response = self.client.search(term, page, per_page).await?;

        Ok(SearchView {
            query: term.to_string(),
            page: page.max(1),
            results: response.results,
            pagination: response.pagination,
            prices: PriceBook::new(),
            token,
        })
    }

    /// Resolves prices for every result of `view`, unless a newer search interrupts
    pub async fn enrich(&self, view: &mut SearchView) -> EnrichmentOutcome {
        self.pipeline
            .run(&view.results, &view.token, &mut view.prices)
            .await
    }

    /// Release detail. Marketplace stats are optional and never fail the lookup.
    pub async fn record(&self, id: u64) -> Result<RecordDetail> {
        let release = self.client.release(id).await?;
        let stats = match self.client.marketplace_stats(id).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                log::debug!("Ignoring marketplace stats failure for {}: {}", id, e);
                None
            }
        };
        Ok(RecordDetail { release, stats })
    }

    /// Price estimate for a single release, through the cache
    pub async fn price(&self, id: u64) -> Result<PriceEstimate> {
        self.client.token()?;
        Ok(self.pipeline.resolve_one(id).await)
    }
}
