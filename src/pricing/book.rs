//! Owned price state of one search session

use crate::models::{PriceEstimate, PriceSource};
use std::collections::HashMap;

/// Lowest value the observed price ceiling can take
pub const MIN_CEILING: f64 = 50.0;

/// Price range offered for filtering once enrichment completes
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRange {
    pub floor: f64,
    pub ceiling: f64,
    pub selected_min: f64,
    pub selected_max: f64,
}

impl PriceRange {
    /// Range `[0, ceiling]` with the whole range selected
    pub fn up_to(ceiling: f64) -> Self {
        Self {
            floor: 0.0,
            ceiling,
            selected_min: 0.0,
            selected_max: ceiling,
        }
    }
}

/// Ceiling of the highest price, never below [`MIN_CEILING`]
pub fn observed_ceiling<I>(prices: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    prices.into_iter().fold(MIN_CEILING, f64::max).ceil()
}

/// Release id -> estimate map for one search, plus the published price range.
///
/// Written by the enrichment pipeline, read by result projection.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    estimates: HashMap<u64, PriceEstimate>,
    range: Option<PriceRange>,
}

impl PriceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u64, estimate: PriceEstimate) {
        self.estimates.insert(id, estimate);
    }

    pub fn get(&self, id: u64) -> Option<&PriceEstimate> {
        self.estimates.get(&id)
    }

    /// Representative price of a release, if known
    pub fn price_of(&self, id: u64) -> Option<f64> {
        self.get(id).and_then(PriceEstimate::representative)
    }

    pub fn source_of(&self, id: u64) -> PriceSource {
        self.get(id).map(|e| e.source).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    /// True once a completed enrichment has published its range
    pub fn is_ready(&self) -> bool {
        self.range.is_some()
    }

    pub fn range(&self) -> Option<&PriceRange> {
        self.range.as_ref()
    }

    pub(crate) fn publish(&mut self, range: PriceRange) {
        self.range = Some(range);
    }

    pub(crate) fn unpublish(&mut self) {
        self.range = None;
    }
}
