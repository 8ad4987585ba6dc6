//! Marketplace pricing: condition-based price suggestions and sales statistics

use crate::api::client::upstream_error;
use crate::api::DiscogsClient;
use crate::error::{CatalogError, Result};
use crate::models::{MarketStats, PriceEstimate, PriceSource};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Conditions consulted, in order, for the typical price of a suggestion set
pub const PREFERRED_CONDITIONS: [&str; 3] = [
    "Very Good Plus (VG+)",
    "Near Mint (NM or M-)",
    "Very Good (VG)",
];

const CURRENCY: &str = "USD";

impl DiscogsClient {
    /// Raw condition -> `{value, currency}` map
    /// GET /marketplace/price_suggestions/{id}?curr_abbr=USD
    pub async fn price_suggestions(&self, id: u64) -> Result<Map<String, Value>> {
        let response = self
            .get(
                &format!("/marketplace/price_suggestions/{}", id),
                &[("curr_abbr", CURRENCY.to_string())],
            )
            .await?;
        // Upstream answers `null` or `{}` when the seller profile has no suggestions
        let value: Value = self.handle_response(response).await?;
        Ok(match value {
            Value::Object(map) => map,
            _ => Map::new(),
        })
    }

    /// Marketplace statistics.
    /// GET /marketplace/stats/{id}?curr_abbr=USD
    ///
    /// 404 and 429 come back as [`CatalogError::NotAvailable`].
    pub async fn marketplace_stats(&self, id: u64) -> Result<MarketStats> {
        let response = self
            .get(
                &format!("/marketplace/stats/{}", id),
                &[("curr_abbr", CURRENCY.to_string())],
            )
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::TOO_MANY_REQUESTS {
            log::debug!("No marketplace stats for {} ({})", id, status);
            return Err(CatalogError::NotAvailable(status.as_u16()));
        }
        if !status.is_success() {
            return Err(upstream_error(response).await);
        }
        self.handle_response(response).await
    }

    /// Best-effort price estimate for a release.
    ///
    /// Price suggestions are tried first; any failure there falls back to
    /// marketplace stats. Only a missing token is returned as an error; every
    /// other problem yields `Ok(None)`.
    pub async fn price_estimate(&self, id: u64) -> Result<Option<PriceEstimate>> {
        self.token()?;

        match self.price_suggestions(id).await {
            Ok(suggestions) => return Ok(Some(estimate_from_suggestions(&suggestions))),
            Err(e) => log::debug!("Price suggestions failed for {}: {}", id, e),
        }

        match self.marketplace_stats(id).await {
            Ok(stats) => Ok(Some(estimate_from_stats(&stats))),
            Err(e) if e.is_not_available() => Ok(None),
            Err(e) => {
                log::warn!("Marketplace stats failed for {}: {}", id, e);
                Ok(None)
            }
        }
    }
}

/// Derives an estimate from a suggestion map.
///
/// `typical` is the first preferred condition with a numeric value, else the
/// median of all numeric values. `min`/`max` span all numeric values.
pub fn estimate_from_suggestions(suggestions: &Map<String, Value>) -> PriceEstimate {
    let numeric: BTreeMap<String, f64> = suggestions
        .iter()
        .filter_map(|(condition, entry)| {
            entry
                .get("value")
                .and_then(Value::as_f64)
                .map(|v| (condition.clone(), v))
        })
        .collect();

    let mut values: Vec<f64> = numeric.values().copied().collect();
    values.sort_by(f64::total_cmp);

    let preferred = PREFERRED_CONDITIONS
        .iter()
        .find_map(|condition| numeric.get(*condition).copied());

    PriceEstimate {
        typical: preferred.or_else(|| median(&values)),
        min: values.first().copied(),
        max: values.last().copied(),
        for_sale: None,
        source: PriceSource::Suggestions,
        suggestions: Some(numeric),
    }
}

/// Derives an estimate from marketplace stats: median (else lowest) as typical
pub fn estimate_from_stats(stats: &MarketStats) -> PriceEstimate {
    PriceEstimate {
        typical: stats.median.or(stats.lowest_price),
        min: stats.lowest_price,
        max: stats.highest_price,
        for_sale: stats.for_sale(),
        source: PriceSource::Stats,
        suggestions: None,
    }
}

/// Element at index `len / 2` of an ascending slice.
/// Even-length input picks the upper of the two central values.
fn median(sorted: &[f64]) -> Option<f64> {
    sorted.get(sorted.len() / 2).copied()
}

#[cfg(test)]
#[path = "marketplace_tests.rs"]
mod tests;
