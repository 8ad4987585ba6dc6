//! Merging prices into search results, then filtering and sorting them for display.
//!
//! Everything here is derived: results and the price book are only read.

use crate::models::{PriceSource, SearchResult};
use crate::pricing::{PriceBook, PriceRange};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A search result with its display price
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedResult {
    pub result: SearchResult,
    pub price: Option<f64>,
    pub source: PriceSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    Relevance,
    YearAsc,
    YearDesc,
    TitleAsc,
    PriceAsc,
    PriceDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::Relevance,
        SortOption::YearAsc,
        SortOption::YearDesc,
        SortOption::TitleAsc,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::YearAsc => "year-asc",
            SortOption::YearDesc => "year-desc",
            SortOption::TitleAsc => "title-asc",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = SortOption::ALL.iter().map(|o| o.as_str()).collect();
                format!("unknown sort '{}', expected one of: {}", s, known.join(", "))
            })
    }
}

/// Price presets offered once prices are loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickRange {
    UpTo20,
    From20To50,
    From50To100,
    All,
}

impl QuickRange {
    /// Bounds of the preset, capped at the range ceiling
    pub fn bounds(&self, range: &PriceRange) -> (f64, f64) {
        match self {
            QuickRange::UpTo20 => (0.0, range.ceiling.min(20.0)),
            QuickRange::From20To50 => (20.0, range.ceiling.min(50.0)),
            QuickRange::From50To100 => (50.0, range.ceiling.min(100.0)),
            QuickRange::All => (range.floor, range.ceiling),
        }
    }
}

impl FromStr for QuickRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0-20" => Ok(QuickRange::UpTo20),
            "20-50" => Ok(QuickRange::From20To50),
            "50-100" => Ok(QuickRange::From50To100),
            "all" => Ok(QuickRange::All),
            other => Err(format!(
                "unknown range '{}', expected one of: 0-20, 20-50, 50-100, all",
                other
            )),
        }
    }
}

/// Price filter; bounds are inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterState {
    pub min: f64,
    pub max: f64,
    pub include_unknown: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
            include_unknown: true,
        }
    }
}

impl FilterState {
    /// Filter selecting the range's current selection, unknown prices included
    pub fn for_range(range: &PriceRange) -> Self {
        Self {
            min: range.selected_min,
            max: range.selected_max,
            include_unknown: true,
        }
    }

    /// Filter for a preset over `range`
    pub fn quick(preset: QuickRange, range: &PriceRange) -> Self {
        let (min, max) = preset.bounds(range);
        Self {
            min,
            max,
            include_unknown: true,
        }
    }

    pub fn accepts(&self, price: Option<f64>) -> bool {
        match price {
            None => self.include_unknown,
            Some(p) => p >= self.min && p <= self.max,
        }
    }
}

/// Attaches each result's display price and source
pub fn merge_prices(results: &[SearchResult], book: &PriceBook) -> Vec<EnrichedResult> {
    results
        .iter()
        .map(|r| EnrichedResult {
            result: r.clone(),
            price: book.price_of(r.id),
            source: book.source_of(r.id),
        })
        .collect()
}

/// Stable sort by the chosen option.
///
/// Missing years count as 0. Missing prices sort last for `price-asc`
/// and first for `price-desc`.
pub fn sort_results(items: &mut [EnrichedResult], sort: SortOption) {
    let year = |e: &EnrichedResult| e.result.year.unwrap_or(0);

    match sort {
        SortOption::Relevance => {}
        SortOption::YearAsc => items.sort_by_key(year),
        SortOption::YearDesc => items.sort_by(|a, b| year(b).cmp(&year(a))),
        SortOption::TitleAsc => items.sort_by(|a, b| a.result.title.cmp(&b.result.title)),
        SortOption::PriceAsc => items.sort_by(|a, b| compare_prices(a.price, b.price)),
        SortOption::PriceDesc => items.sort_by(|a, b| compare_prices(b.price, a.price)),
    }
}

/// Merge, filter (only once prices are ready) and sort
pub fn project(
    results: &[SearchResult],
    book: &PriceBook,
    filter: &FilterState,
    sort: SortOption,
) -> Vec<EnrichedResult> {
    let mut items = merge_prices(results, book);
    if book.is_ready() {
        items.retain(|e| filter.accepts(e.price));
    }
    sort_results(&mut items, sort);
    items
}

/// Ascending price order with missing prices treated as the highest
pub fn compare_prices(a: Option<f64>, b: Option<f64>) -> Ordering {
    a.unwrap_or(f64::INFINITY)
        .total_cmp(&b.unwrap_or(f64::INFINITY))
}
