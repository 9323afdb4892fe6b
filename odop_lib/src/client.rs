//! Caching wrapper around the API client.
//!
//! Cache hits bypass the network entirely. There is no retry, backoff,
//! or request deduplication: a failed call surfaces immediately and
//! recovery is the caller's reload.

use odop_api::types::{FilterOptions, ListResponse, Product, Stats};
use odop_api::{Client, ProductQuery, Query};

use crate::cache::TtlCache;
use crate::error::OdopError;

/// API client wrapper that adds in-memory response caching.
pub struct CachedClient {
    inner: Client,
    cache: TtlCache,
}

impl CachedClient {
    /// Creates a new cached client using the default API URL.
    pub fn new(cache: TtlCache) -> Self {
        Self {
            inner: Client::new(),
            cache,
        }
    }

    /// Creates a new cached client with a custom base URL.
    pub fn with_base_url(base_url: &str, cache: TtlCache) -> Self {
        Self {
            inner: Client::with_base_url(base_url),
            cache,
        }
    }

    /// Fetches one page of products, returning cached results when available.
    pub async fn get_products(
        &self,
        query: &ProductQuery,
    ) -> Result<ListResponse<Product>, OdopError> {
        let cache_key = format!("products:{}", query_to_cache_key(query));

        if let Some(cached) = self.cache.get(&cache_key) {
            let resp: ListResponse<Product> = serde_json::from_str(&cached)?;
            return Ok(resp);
        }

        let resp = self.inner.get_products(query).await?;
        if let Ok(json) = serde_json::to_string(&resp) {
            self.cache.put(cache_key, json);
        }
        Ok(resp)
    }

    /// Fetches products matching a search term, returning cached results
    /// when available.
    pub async fn search_products(
        &self,
        term: &str,
        query: &ProductQuery,
    ) -> Result<ListResponse<Product>, OdopError> {
        let cache_key = format!("search:{:?}:{}", term, query_to_cache_key(query));

        if let Some(cached) = self.cache.get(&cache_key) {
            let resp: ListResponse<Product> = serde_json::from_str(&cached)?;
            return Ok(resp);
        }

        let resp = self.inner.search_products(term, query).await?;
        if let Ok(json) = serde_json::to_string(&resp) {
            self.cache.put(cache_key, json);
        }
        Ok(resp)
    }

    /// Fetches catalog statistics, returning cached results when available.
    pub async fn get_stats(&self) -> Result<Stats, OdopError> {
        let cache_key = "stats".to_string();

        if let Some(cached) = self.cache.get(&cache_key) {
            let stats: Stats = serde_json::from_str(&cached)?;
            return Ok(stats);
        }

        let stats = self.inner.get_stats().await?;
        if let Ok(json) = serde_json::to_string(&stats) {
            self.cache.put(cache_key, json);
        }
        Ok(stats)
    }

    /// Fetches filter options, returning cached results when available.
    pub async fn get_filter_options(&self) -> Result<FilterOptions, OdopError> {
        let cache_key = "filters".to_string();

        if let Some(cached) = self.cache.get(&cache_key) {
            let options: FilterOptions = serde_json::from_str(&cached)?;
            return Ok(options);
        }

        let options = self.inner.get_filter_options().await?;
        if let Ok(json) = serde_json::to_string(&options) {
            self.cache.put(cache_key, json);
        }
        Ok(options)
    }

    /// Fetches every page of products matching the query, following the
    /// paginated envelope until it is exhausted. A bare-array response
    /// is taken as the complete result set.
    ///
    /// `on_page` is invoked after each page with the number of records
    /// fetched so far and the server-reported total, for progress
    /// reporting.
    pub async fn fetch_all_products(
        &self,
        query: &ProductQuery,
        page_size: i64,
        mut on_page: impl FnMut(usize, i64),
    ) -> Result<Vec<Product>, OdopError> {
        let mut products = Vec::new();
        let mut page = 1;

        loop {
            let page_query = clone_query(query).with_page(page).with_page_size(page_size);
            let resp = self.get_products(&page_query).await?;
            let total = resp.total_count();
            let has_next = resp.next_url().is_some();
            let received = resp.items().len();

            products.extend(resp.into_items());
            on_page(products.len(), total);

            // An empty page with a next link would loop forever; treat it
            // as exhaustion.
            if !has_next || received == 0 {
                return Ok(products);
            }
            page += 1;
        }
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

// ProductQuery has no Clone derive upstream; rebuild it field by field.
fn clone_query(query: &ProductQuery) -> ProductQuery {
    ProductQuery {
        common: query.common,
        state: query.state.clone(),
        district: query.district.clone(),
        category: query.category.clone(),
        sector: query.sector.clone(),
        gi_status: query.gi_status.clone(),
        search: query.search.clone(),
        sort_by: query.sort_by,
    }
}

fn query_to_cache_key(query: &ProductQuery) -> String {
    format!(
        "p{}:ps{:?}:st{:?}:di{:?}:ca{:?}:se{:?}:gi{:?}:q{:?}:sb{:?}:sd{}",
        query.common.page,
        query.common.page_size,
        query.state,
        query.district,
        query.category,
        query.sector,
        query.gi_status,
        query.search,
        query.sort_by,
        query.common.sort_direction as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_body(page: i64, total: i64, next: Option<&str>, ids: &[i64]) -> String {
        let results: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "id": id,
                    "product": format!("Product {}", id),
                    "state": "Odisha",
                    "district": "Puri",
                })
            })
            .collect();
        serde_json::json!({
            "count": total,
            "next": next,
            "previous": if page > 1 { Some("prev") } else { None },
            "results": results,
        })
        .to_string()
    }

    #[tokio::test]
    async fn cache_hit_skips_the_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(page_body(1, 1, None, &[1])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = CachedClient::with_base_url(
            &mock_server.uri(),
            TtlCache::new(Duration::from_secs(60)),
        );

        let first = client.get_products(&ProductQuery::default()).await.unwrap();
        let second = client.get_products(&ProductQuery::default()).await.unwrap();
        assert_eq!(first.items().len(), second.items().len());
    }

    #[tokio::test]
    async fn distinct_queries_use_distinct_cache_keys() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/"))
            .and(query_param("state", "Odisha"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(page_body(1, 1, None, &[1])),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products/"))
            .and(query_param("state", "Bihar"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(page_body(1, 2, None, &[2, 3])),
            )
            .mount(&mock_server)
            .await;

        let client = CachedClient::with_base_url(
            &mock_server.uri(),
            TtlCache::new(Duration::from_secs(60)),
        );

        let odisha = client
            .get_products(&ProductQuery::default().with_state("Odisha"))
            .await
            .unwrap();
        let bihar = client
            .get_products(&ProductQuery::default().with_state("Bihar"))
            .await
            .unwrap();
        assert_eq!(odisha.items().len(), 1);
        assert_eq!(bihar.items().len(), 2);
    }

    #[tokio::test]
    async fn fetch_all_follows_pagination() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page_body(
                1,
                3,
                Some("http://example.com/products/?page=2"),
                &[1, 2],
            )))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products/"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(page_body(2, 3, None, &[3])),
            )
            .mount(&mock_server)
            .await;

        let client = CachedClient::with_base_url(
            &mock_server.uri(),
            TtlCache::new(Duration::from_secs(60)),
        );

        let mut progress = Vec::new();
        let products = client
            .fetch_all_products(&ProductQuery::default(), 2, |fetched, total| {
                progress.push((fetched, total));
            })
            .await
            .unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(products[2].id, 3);
        assert_eq!(progress, vec![(2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn fetch_all_accepts_bare_array() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"id": 9, "product": "Lone Craft", "state": "Goa", "district": "North Goa"}]"#,
            ))
            .mount(&mock_server)
            .await;

        let client = CachedClient::with_base_url(
            &mock_server.uri(),
            TtlCache::new(Duration::from_secs(60)),
        );

        let products = client
            .fetch_all_products(&ProductQuery::default(), 2000, |_, _| {})
            .await
            .unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn api_error_propagates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/stats/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&mock_server)
            .await;

        let client = CachedClient::with_base_url(
            &mock_server.uri(),
            TtlCache::new(Duration::from_secs(60)),
        );

        let result = client.get_stats().await;
        assert!(matches!(result, Err(OdopError::Api(_))));
    }
}
