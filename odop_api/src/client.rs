//! HTTP client for the ODOP catalog REST API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{ProductQuery, Query},
    types::{FilterOptions, ListResponse, Product, Stats},
    Error,
};

/// HTTP client for the ODOP catalog REST API.
///
/// Each request builds a fresh `reqwest::Client` with a 10-second
/// timeout. There is no retry or backoff; failures surface to the caller
/// and recovery is a user-initiated reload.
pub struct Client {
    /// Base URL for the API. Defaults to `http://127.0.0.1:8000/api`.
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at a locally served backend.
    pub fn new() -> Self {
        Self {
            base_api_url: "http://127.0.0.1:8000/api".to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Also used for testing
    /// with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        self.get_at_url(url).await
    }

    async fn get_at_url<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("content-type", "application/json")
            .header("accept", "application/json, text/plain, */*")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// Fetches one page of products matching the given query. The
    /// response is either a paginated envelope or a bare array.
    pub async fn get_products(
        &self,
        query: &ProductQuery,
    ) -> Result<ListResponse<Product>, Error> {
        self.get::<ListResponse<Product>, ProductQuery>("/products/", Some(query))
            .await
    }

    /// Fetches products matching a free-text search term, combined with
    /// the query's other filter parameters.
    pub async fn search_products(
        &self,
        term: &str,
        query: &ProductQuery,
    ) -> Result<ListResponse<Product>, Error> {
        let mut url = self.get_url("/products/", Some(query))?;
        url.query_pairs_mut().append_pair("search", term);
        self.get_at_url(url).await
    }

    /// Fetches catalog-wide statistics.
    pub async fn get_stats(&self) -> Result<Stats, Error> {
        self.get::<Stats, ProductQuery>("/products/stats/", None)
            .await
    }

    /// Fetches the distinct filterable values per dimension.
    pub async fn get_filter_options(&self) -> Result<FilterOptions, Error> {
        self.get::<FilterOptions, ProductQuery>("/products/filters/", None)
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}
