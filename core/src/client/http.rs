// core/src/client/http.rs

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::api::CatalogApi;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Product, ProductPage, SeedReport};
use crate::params::{CategoryFilter, TrendingMetric};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/products";

/// `CatalogApi` over the server's REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
  client: Client,
  base_url: String,
}

impl Default for HttpCatalogApi {
  fn default() -> Self {
    Self::new(DEFAULT_API_BASE_URL)
  }
}

impl HttpCatalogApi {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self::with_client(Client::new(), base_url)
  }

  pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Self { client, base_url }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn endpoint(&self, path: &str) -> String {
    format!("{}/{}", self.base_url, path)
  }

  async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> CatalogResult<T> {
    let status = response.status();
    if !status.is_success() {
      return Err(CatalogError::UnexpectedStatus {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
      });
    }
    Ok(response.json::<T>().await?)
  }

  async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> CatalogResult<T> {
    let endpoint = self.endpoint(path);
    debug!(%endpoint, "GET");
    let response = self.client.get(&endpoint).query(params).send().await?;
    Self::decode(&endpoint, response).await
  }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
  #[instrument(name = "http_api::search", skip(self), err(Display))]
  async fn search(&self, query: &str, page: u64, limit: u64) -> CatalogResult<ProductPage> {
    self
      .get(
        "search",
        &[
          ("query", query.to_string()),
          ("page", page.to_string()),
          ("limit", limit.to_string()),
        ],
      )
      .await
  }

  #[instrument(name = "http_api::list_all", skip(self), err(Display))]
  async fn list_all(&self, page: u64, limit: u64, category: &CategoryFilter) -> CatalogResult<ProductPage> {
    let mut params = vec![("page", page.to_string()), ("limit", limit.to_string())];
    if let Some(name) = category.as_name() {
      params.push(("category", name.to_string()));
    }
    self.get("all", &params).await
  }

  #[instrument(name = "http_api::suggestions", skip(self), err(Display))]
  async fn suggestions(&self, query: &str) -> CatalogResult<Vec<String>> {
    self.get("suggestions", &[("query", query.to_string())]).await
  }

  #[instrument(name = "http_api::trending", skip(self), err(Display))]
  async fn trending(&self, metric: TrendingMetric, limit: u64) -> CatalogResult<Vec<Product>> {
    self
      .get(
        "trending",
        &[("metric", metric.as_str().to_string()), ("limit", limit.to_string())],
      )
      .await
  }

  #[instrument(name = "http_api::seed", skip(self), err(Display))]
  async fn seed(&self) -> CatalogResult<SeedReport> {
    let endpoint = self.endpoint("seed");
    let response = self.client.post(&endpoint).send().await?;
    Self::decode(&endpoint, response).await
  }
}
