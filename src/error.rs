//! Error types for catalog operations

use thiserror::Error;

/// Unified error type for remote catalog, cache and configuration failures
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing or unusable configuration (e.g. no access token)
    #[error("Configuration error: {0}")]
    Config(String),
    /// Upstream API answered with a non-success status
    #[error("{status} {reason} - {detail}")]
    Upstream {
        status: u16,
        reason: String,
        detail: String,
    },
    /// Marketplace has no data for the item (404) or is rate limiting (429)
    #[error("No marketplace data available (HTTP {0})")]
    NotAvailable(u16),
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Price cache database failure
    #[error("Cache error: {0}")]
    Cache(#[from] rusqlite::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// HTTP-like status for the error, where one applies.
    ///
    /// A missing token reports 401 so callers can treat it like an auth failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Config(_) => Some(401),
            CatalogError::Upstream { status, .. } => Some(*status),
            CatalogError::NotAvailable(status) => Some(*status),
            CatalogError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for 404/429 marketplace answers, which mean "no estimate" rather than failure
    pub fn is_not_available(&self) -> bool {
        matches!(self, CatalogError::NotAvailable(_))
    }
}

/// Result alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
