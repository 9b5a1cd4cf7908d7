// core/src/store/mod.rs

//! Persistence boundary for the product collection.
//!
//! The query service only talks to `dyn ProductStore`; the handle is created at
//! startup and passed in explicitly.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{NewProduct, Product, ProductSummary};
use crate::params::TrendingMetric;
use crate::query::SearchCondition;

pub use memory::InMemoryStore;
pub use postgres::PgProductStore;

#[async_trait]
pub trait ProductStore: Send + Sync {
  /// Number of products matching `condition`.
  async fn count(&self, condition: &SearchCondition) -> CatalogResult<u64>;

  /// One page of matches, most viewed first (ties by id).
  async fn find_page(&self, condition: &SearchCondition, skip: u64, limit: u64) -> CatalogResult<Vec<ProductSummary>>;

  /// Every distinct category, sorted ascending.
  async fn distinct_categories(&self) -> CatalogResult<Vec<String>>;

  /// Up to `limit` distinct names of matching products, most viewed first.
  async fn distinct_names(&self, condition: &SearchCondition, limit: u64) -> CatalogResult<Vec<String>>;

  /// Up to `limit` products ordered by `metric` descending (ties by id).
  async fn top_by(&self, metric: TrendingMetric, limit: u64) -> CatalogResult<Vec<Product>>;

  /// Adds one view to each listed product. Returns the number updated.
  async fn increment_views(&self, ids: &[Uuid]) -> CatalogResult<u64>;

  /// Deletes every product and inserts `products`. Returns the inserted count.
  async fn replace_all(&self, products: Vec<NewProduct>) -> CatalogResult<usize>;

  /// Releases backend resources. The store must not be used afterwards.
  async fn close(&self);
}

pub(crate) fn to_i64(value: u64) -> i64 {
  i64::try_from(value).unwrap_or(i64::MAX)
}
