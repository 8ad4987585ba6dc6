//! HTTP plumbing shared by all Discogs endpoints

use crate::error::{CatalogError, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://api.discogs.com";
const USER_AGENT: &str = "VinylCatalog/1.0";

/// Discogs API client.
///
/// Every request carries the access token as a `token` query parameter. A
/// missing token is reported as [`CatalogError::Config`] before anything is sent.
pub struct DiscogsClient {
    pub(crate) client: Client,
    pub(crate) token: Option<String>,
    pub(crate) base_url: String,
}

impl DiscogsClient {
    /// Creates a client against the public Discogs API
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Creates a client against an arbitrary base URL (mock servers, proxies)
    pub fn with_base_url(token: Option<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        log::debug!("Creating Discogs client for {}", base_url);
        Self {
            client: Client::new(),
            token: token.filter(|t| !t.trim().is_empty()),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn token(&self) -> Result<&str> {
        self.token.as_deref().ok_or_else(|| {
            CatalogError::Config("Missing Discogs token (DISCOGS_TOKEN).".to_string())
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends an authenticated GET and returns the raw response, whatever its status
    pub(crate) async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let token = self.token()?;
        let url = self.url(path);
        log::info!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .query(query)
            .query(&[("token", token)])
            .send()
            .await?;

        log::debug!("{} -> {}", url, response.status());
        Ok(response)
    }

    /// Decodes a success body as JSON, or turns a failure into [`CatalogError::Upstream`]
    pub(crate) async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Builds an upstream error, taking the detail from a JSON error body when there is one
pub(crate) async fn upstream_error(response: Response) -> CatalogError {
    let status = response.status();
    let reason = status.canonical_reason().unwrap_or_default().to_string();
    let body = response.text().await.unwrap_or_default();
    let detail = error_detail(&body).unwrap_or_else(|| {
        if reason.is_empty() {
            "Unknown error".to_string()
        } else {
            reason.clone()
        }
    });

    log::warn!("Discogs request failed with {}: {}", status, detail);
    CatalogError::Upstream {
        status: status.as_u16(),
        reason,
        detail,
    }
}

/// `message` from a JSON error body, or the whole body re-serialized
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("message").and_then(|m| m.as_str()) {
        Some(message) if !message.is_empty() => Some(message.to_string()),
        _ => Some(value.to_string()),
    }
}
