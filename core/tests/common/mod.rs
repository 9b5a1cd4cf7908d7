// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use catalog::{
  CatalogApi, CatalogError, CatalogResult, CatalogService, CategoryFilter, InMemoryStore, NewProduct, Product,
  ProductPage, ProductStore, ProductSummary, SearchCondition, SeedReport, TrendingMetric,
};
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;
use uuid::Uuid;

// --- Helper for Tracing Setup ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixtures ---

pub fn product(name: &str, description: &str, category: &str, views: i64, likes: i64) -> Product {
  Product {
    id: Uuid::new_v4(),
    name: name.to_string(),
    description: description.to_string(),
    price: 10.0,
    category: category.to_string(),
    image: catalog::models::DEFAULT_PRODUCT_IMAGE.to_string(),
    views,
    likes,
    created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
  }
}

/// Store plus a service over it, with the sample catalog already loaded.
pub async fn seeded_service() -> (Arc<InMemoryStore>, CatalogService) {
  let store = Arc::new(InMemoryStore::new());
  let service = CatalogService::new(store.clone());
  service.seed().await.expect("seeding the in-memory store");
  (store, service)
}

pub fn service_with(products: Vec<Product>) -> (Arc<InMemoryStore>, CatalogService) {
  let store = Arc::new(InMemoryStore::with_products(products));
  let service = CatalogService::new(store.clone());
  (store, service)
}

pub fn views_of(store: &InMemoryStore, name: &str) -> i64 {
  store
    .snapshot()
    .into_iter()
    .find(|product| product.name == name)
    .map(|product| product.views)
    .expect("product present in store")
}

// --- A store that fails every call ---

#[derive(Debug, Default)]
pub struct FailingStore;

fn unavailable() -> CatalogError {
  CatalogError::Internal("store unavailable".to_string())
}

#[async_trait]
impl ProductStore for FailingStore {
  async fn count(&self, _condition: &SearchCondition) -> CatalogResult<u64> {
    Err(unavailable())
  }

  async fn find_page(&self, _condition: &SearchCondition, _skip: u64, _limit: u64) -> CatalogResult<Vec<ProductSummary>> {
    Err(unavailable())
  }

  async fn distinct_categories(&self) -> CatalogResult<Vec<String>> {
    Err(unavailable())
  }

  async fn distinct_names(&self, _condition: &SearchCondition, _limit: u64) -> CatalogResult<Vec<String>> {
    Err(unavailable())
  }

  async fn top_by(&self, _metric: TrendingMetric, _limit: u64) -> CatalogResult<Vec<Product>> {
    Err(unavailable())
  }

  async fn increment_views(&self, _ids: &[Uuid]) -> CatalogResult<u64> {
    Err(unavailable())
  }

  async fn replace_all(&self, _products: Vec<NewProduct>) -> CatalogResult<usize> {
    Err(unavailable())
  }

  async fn close(&self) {}
}

// --- A store whose replace yields between its delete and its insert ---

/// Counts and replaces only. `replace_all` clears, yields to the scheduler,
/// then inserts, so unserialized seeds interleave and duplicate the catalog.
#[derive(Debug, Default)]
pub struct SplitReplaceStore {
  products: Mutex<Vec<Product>>,
}

impl SplitReplaceStore {
  pub fn len(&self) -> usize {
    self.products.lock().len()
  }
}

#[async_trait]
impl ProductStore for SplitReplaceStore {
  async fn count(&self, _condition: &SearchCondition) -> CatalogResult<u64> {
    Ok(self.len() as u64)
  }

  async fn find_page(&self, _condition: &SearchCondition, _skip: u64, _limit: u64) -> CatalogResult<Vec<ProductSummary>> {
    Ok(Vec::new())
  }

  async fn distinct_categories(&self) -> CatalogResult<Vec<String>> {
    Ok(Vec::new())
  }

  async fn distinct_names(&self, _condition: &SearchCondition, _limit: u64) -> CatalogResult<Vec<String>> {
    Ok(Vec::new())
  }

  async fn top_by(&self, _metric: TrendingMetric, _limit: u64) -> CatalogResult<Vec<Product>> {
    Ok(Vec::new())
  }

  async fn increment_views(&self, _ids: &[Uuid]) -> CatalogResult<u64> {
    Ok(0)
  }

  async fn replace_all(&self, products: Vec<NewProduct>) -> CatalogResult<usize> {
    let now = Utc::now();
    let materialized = products
      .into_iter()
      .map(|product| product.into_product(now))
      .collect::<CatalogResult<Vec<_>>>()?;
    self.products.lock().clear();
    tokio::task::yield_now().await;
    let count = materialized.len();
    self.products.lock().extend(materialized);
    Ok(count)
  }

  async fn close(&self) {}
}

// --- Scriptable client API ---

/// `CatalogApi` over an in-memory service, with per-query delays, failure
/// switches and a call log.
pub struct MockCatalogApi {
  inner: CatalogService,
  search_delays: Mutex<HashMap<String, Duration>>,
  suggestion_delays: Mutex<HashMap<String, Duration>>,
  trending_delays: Mutex<VecDeque<Duration>>,
  pub fail_results: AtomicBool,
  pub fail_suggestions: AtomicBool,
  pub fail_trending: AtomicBool,
  pub fail_seed: AtomicBool,
  calls: Mutex<Vec<String>>,
}

impl MockCatalogApi {
  pub fn new(inner: CatalogService) -> Self {
    Self {
      inner,
      search_delays: Mutex::new(HashMap::new()),
      suggestion_delays: Mutex::new(HashMap::new()),
      trending_delays: Mutex::new(VecDeque::new()),
      fail_results: AtomicBool::new(false),
      fail_suggestions: AtomicBool::new(false),
      fail_trending: AtomicBool::new(false),
      fail_seed: AtomicBool::new(false),
      calls: Mutex::new(Vec::new()),
    }
  }

  pub fn empty() -> Self {
    Self::new(CatalogService::new(Arc::new(InMemoryStore::new())))
  }

  pub async fn seeded() -> Self {
    let (_, service) = seeded_service().await;
    Self::new(service)
  }

  pub fn delay_search(&self, query: &str, delay: Duration) {
    self.search_delays.lock().insert(query.to_string(), delay);
  }

  pub fn delay_suggestions(&self, query: &str, delay: Duration) {
    self.suggestion_delays.lock().insert(query.to_string(), delay);
  }

  /// Delays the next trending call only. Its failure switch is read when the
  /// call starts, before the delay.
  pub fn delay_next_trending(&self, delay: Duration) {
    self.trending_delays.lock().push_back(delay);
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().clone()
  }

  pub fn count_calls(&self, prefix: &str) -> usize {
    self.calls.lock().iter().filter(|call| call.starts_with(prefix)).count()
  }

  fn record(&self, call: String) {
    self.calls.lock().push(call);
  }

  fn failure(flag: &AtomicBool) -> CatalogResult<()> {
    if flag.load(Ordering::SeqCst) {
      return Err(CatalogError::UnexpectedStatus {
        endpoint: "mock".to_string(),
        status: 500,
      });
    }
    Ok(())
  }
}

#[async_trait]
impl CatalogApi for MockCatalogApi {
  async fn search(&self, query: &str, page: u64, limit: u64) -> CatalogResult<ProductPage> {
    self.record(format!("search:{query}:{page}"));
    let delay = self.search_delays.lock().get(query).copied();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    Self::failure(&self.fail_results)?;
    CatalogApi::search(&self.inner, query, page, limit).await
  }

  async fn list_all(&self, page: u64, limit: u64, category: &CategoryFilter) -> CatalogResult<ProductPage> {
    self.record(format!("all:{page}:{}", category.selector_value()));
    Self::failure(&self.fail_results)?;
    CatalogApi::list_all(&self.inner, page, limit, category).await
  }

  async fn suggestions(&self, query: &str) -> CatalogResult<Vec<String>> {
    self.record(format!("suggestions:{query}"));
    let delay = self.suggestion_delays.lock().get(query).copied();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    Self::failure(&self.fail_suggestions)?;
    CatalogApi::suggestions(&self.inner, query).await
  }

  async fn trending(&self, metric: TrendingMetric, limit: u64) -> CatalogResult<Vec<Product>> {
    self.record(format!("trending:{metric}:{limit}"));
    let outcome = Self::failure(&self.fail_trending);
    let delay = self.trending_delays.lock().pop_front();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    outcome?;
    CatalogApi::trending(&self.inner, metric, limit).await
  }

  async fn seed(&self) -> CatalogResult<SeedReport> {
    self.record("seed".to_string());
    Self::failure(&self.fail_seed)?;
    CatalogApi::seed(&self.inner).await
  }
}
