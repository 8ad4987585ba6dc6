//! Catalog records and price estimates as exchanged with the upstream API

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A single release returned by the catalog search
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SearchResult {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// The search endpoint reports years as strings; releases report numbers
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub catno: Option<String>,
}

impl SearchResult {
    /// Cover image URL, falling back to the thumbnail
    pub fn image_url(&self) -> Option<&str> {
        self.cover_image
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.thumb.as_deref().filter(|s| !s.is_empty()))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub items: Option<u64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            pages: 1,
            per_page: None,
            items: None,
        }
    }
}

/// Search endpoint response
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Full release record
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Release {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artists_sort: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub formats: Vec<Format>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub community: Option<Community>,
    #[serde(default)]
    pub tracklist: Vec<Track>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lowest_price: Option<f64>,
    #[serde(default)]
    pub num_for_sale: Option<u64>,
}

impl Release {
    /// URI of the first image, if any
    pub fn cover_uri(&self) -> Option<&str> {
        self.images.first().and_then(|i| i.uri.as_deref())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Image {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Label {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub catno: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Format {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Community {
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub have: Option<u64>,
    #[serde(default)]
    pub want: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Rating {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average: Option<f64>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Track {
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Video {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

/// Marketplace statistics for a release.
///
/// Price fields only count when the upstream sends a plain number.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct MarketStats {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lowest_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub median: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub highest_price: Option<f64>,
    #[serde(default)]
    pub num_for_sale: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_for_sale: Option<u64>,
}

impl MarketStats {
    /// Listing count under either of the two names the upstream uses
    pub fn for_sale(&self) -> Option<u64> {
        self.num_for_sale.or(self.number_for_sale)
    }
}

/// Where an estimate came from
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceSource {
    #[serde(rename = "suggestions")]
    Suggestions,
    #[serde(rename = "stats")]
    Stats,
    #[serde(rename = "release_lowest")]
    ReleaseLowest,
    #[default]
    #[serde(rename = "")]
    Unknown,
}

impl PriceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSource::Suggestions => "suggestions",
            PriceSource::Stats => "stats",
            PriceSource::ReleaseLowest => "release_lowest",
            PriceSource::Unknown => "",
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == PriceSource::Unknown
    }
}

/// Best-effort price estimate; every field may be absent
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct PriceEstimate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, rename = "forSale", skip_serializing_if = "Option::is_none")]
    pub for_sale: Option<u64>,
    #[serde(default, skip_serializing_if = "PriceSource::is_unknown")]
    pub source: PriceSource,
    /// Raw condition -> value map when derived from price suggestions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<BTreeMap<String, f64>>,
}

impl PriceEstimate {
    /// One-point estimate from a release's lowest listed price
    pub fn release_lowest(price: f64) -> Self {
        Self {
            typical: Some(price),
            min: Some(price),
            max: Some(price),
            source: PriceSource::ReleaseLowest,
            ..Self::default()
        }
    }

    /// True when at least one of typical/min/max is present
    pub fn has_price(&self) -> bool {
        self.typical.is_some() || self.min.is_some() || self.max.is_some()
    }

    /// Display price: typical, else min, else max
    pub fn representative(&self) -> Option<f64> {
        self.typical.or(self.min).or(self.max)
    }
}

/// Accepts a JSON number and treats anything else (null, strings, objects) as absent
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

/// Accepts a year as number or numeric string; anything else is absent
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
    .filter(|y| *y != 0))
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
