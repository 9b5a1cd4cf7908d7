// core/src/client/api.rs

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{Product, ProductPage, SeedReport};
use crate::params::{CategoryFilter, PageRequest, TrendingMetric, TrendingRequest};
use crate::service::CatalogService;

/// The five catalog operations as seen by a client.
#[async_trait]
pub trait CatalogApi: Send + Sync + 'static {
  async fn search(&self, query: &str, page: u64, limit: u64) -> CatalogResult<ProductPage>;

  async fn list_all(&self, page: u64, limit: u64, category: &CategoryFilter) -> CatalogResult<ProductPage>;

  async fn suggestions(&self, query: &str) -> CatalogResult<Vec<String>>;

  async fn trending(&self, metric: TrendingMetric, limit: u64) -> CatalogResult<Vec<Product>>;

  async fn seed(&self) -> CatalogResult<SeedReport>;
}

/// In-process client: calls the service directly, no HTTP in between.
#[async_trait]
impl CatalogApi for CatalogService {
  async fn search(&self, query: &str, page: u64, limit: u64) -> CatalogResult<ProductPage> {
    CatalogService::search(self, Some(query), PageRequest::new(page, limit)).await
  }

  async fn list_all(&self, page: u64, limit: u64, category: &CategoryFilter) -> CatalogResult<ProductPage> {
    CatalogService::list_all(self, PageRequest::new(page, limit), category).await
  }

  async fn suggestions(&self, query: &str) -> CatalogResult<Vec<String>> {
    CatalogService::suggest(self, Some(query)).await
  }

  async fn trending(&self, metric: TrendingMetric, limit: u64) -> CatalogResult<Vec<Product>> {
    CatalogService::trending(self, TrendingRequest::new(metric, limit)).await
  }

  async fn seed(&self) -> CatalogResult<SeedReport> {
    CatalogService::seed(self).await
  }
}
