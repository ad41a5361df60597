use crate::api::types::*;
use crate::config::Config;
use crate::utils::error::{SnippetError, SnippetResult};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Header carrying the API key on every authenticated call
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the SnippetKit API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration
    pub fn new(config: &Config) -> SnippetResult<Self> {
        if config.api_url.trim().is_empty() {
            return Err(SnippetError::Config("API URL cannot be empty".to_string()));
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout.max(1)))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("snippetkit-cli/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SnippetError::Network(format!("Failed to build HTTP client: {}", e)))?;

        // Ensure URL doesn't end with slash for consistent path construction
        let base_url = config.api_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one snippet by server id or short id
    pub async fn fetch_by_id(&self, id: &str, token: &str) -> SnippetResult<Snippet> {
        let id = id.trim();
        if id.is_empty() {
            return Err(SnippetError::NotFound(String::new()));
        }

        let url = format!(
            "{}/api/snippet/get/{}",
            self.base_url,
            urlencoding::encode(id)
        );
        debug!(%url, "fetching snippet");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, token)
            .send()
            .await?;
        let envelope: Envelope<SnippetPayload> = self.read_envelope(response).await?;

        if !envelope.success {
            debug!(error = ?envelope.error, "fetch reported failure");
            return Err(SnippetError::NotFound(id.to_string()));
        }

        let snippet = envelope
            .data
            .and_then(SnippetPayload::into_snippet)
            .filter(|snippet| !snippet.id.is_empty())
            .ok_or_else(|| SnippetError::NotFound(id.to_string()))?;

        if !snippet.matches_id(id) {
            return Err(SnippetError::Protocol(format!(
                "requested snippet '{}' but the server returned '{}'",
                id, snippet.id
            )));
        }

        Ok(snippet)
    }

    /// Search snippets. Zero matches is an empty list, not an error.
    pub async fn search(&self, query: &SearchQuery, token: &str) -> SnippetResult<Vec<Snippet>> {
        if query.limit == 0 {
            return Err(SnippetError::Config(
                "Limit must be greater than 0".to_string(),
            ));
        }

        let url = format!("{}/api/snippet/search", self.base_url);
        let params = query.params();
        debug!(%url, ?params, "searching snippets");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, token)
            .query(&params)
            .send()
            .await?;
        let envelope: Envelope<Vec<Snippet>> = self.read_envelope(response).await?;

        if !envelope.success {
            return Err(SnippetError::Protocol(
                envelope
                    .error
                    .unwrap_or_else(|| "search was not successful".to_string()),
            ));
        }

        Ok(envelope.data.unwrap_or_default())
    }

    /// Ask the service whether `token` is valid. Rejection is `Ok(false)`.
    pub async fn verify(&self, token: &str) -> SnippetResult<bool> {
        let url = format!("{}/api/token/verify", self.base_url);
        debug!(%url, "verifying API key");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, token)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(false);
        }

        let envelope: Envelope<serde_json::Value> = self.read_envelope(response).await?;
        Ok(envelope.success)
    }

    /// Decode the response body as an envelope regardless of status, so that
    /// `{"success": false}` on a 404 reads the same as on a 200.
    async fn read_envelope<T>(&self, response: Response) -> SnippetResult<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<Envelope<T>>(&text) {
            Ok(envelope) => Ok(envelope),
            Err(e) if status.is_success() => Err(SnippetError::Protocol(format!(
                "malformed response body: {}",
                e
            ))),
            Err(_) => Err(SnippetError::Protocol(if text.trim().is_empty() {
                format!("HTTP {} error", status.as_u16())
            } else {
                format!("HTTP {}: {}", status.as_u16(), text.trim())
            })),
        }
    }
}
