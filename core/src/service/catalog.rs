// core/src/service/catalog.rs

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::impressions::{ImpressionRecorder, StoreImpressionRecorder};
use crate::error::CatalogResult;
use crate::models::{total_pages, Product, ProductPage, ProductSummary, SeedReport};
use crate::params::{CategoryFilter, PageRequest, TrendingRequest, MIN_SUGGESTION_CHARS, SUGGESTION_LIMIT};
use crate::query::{build_search_condition, suggestion_condition, SearchCondition};
use crate::seed::{sample_products, SEED_MESSAGE};
use crate::store::ProductStore;

/// Keeps the first occurrence of every id, preserving order.
fn dedupe_by_id<T>(items: Vec<T>, id_of: impl Fn(&T) -> Uuid) -> Vec<T> {
  let mut seen = HashSet::with_capacity(items.len());
  items.into_iter().filter(|item| seen.insert(id_of(item))).collect()
}

/// Translates catalog requests into store queries and shapes the results.
pub struct CatalogService {
  store: Arc<dyn ProductStore>,
  impressions: Arc<dyn ImpressionRecorder>,
  // Serializes seeding within this process only.
  seed_lock: Mutex<()>,
}

impl CatalogService {
  /// Service whose impressions increment the store's view counters.
  pub fn new(store: Arc<dyn ProductStore>) -> Self {
    let impressions = Arc::new(StoreImpressionRecorder::new(store.clone()));
    Self::with_impressions(store, impressions)
  }

  pub fn with_impressions(store: Arc<dyn ProductStore>, impressions: Arc<dyn ImpressionRecorder>) -> Self {
    Self {
      store,
      impressions,
      seed_lock: Mutex::new(()),
    }
  }

  pub fn store(&self) -> &Arc<dyn ProductStore> {
    &self.store
  }

  async fn fetch_page(&self, condition: &SearchCondition, request: PageRequest) -> CatalogResult<ProductPage> {
    // Count and page are separate reads; concurrent writers can make them disagree.
    let total = self.store.count(condition).await?;
    let products = self.store.find_page(condition, request.skip(), request.limit).await?;
    let products = dedupe_by_id(products, |product: &ProductSummary| product.id);
    let categories = self.store.distinct_categories().await?;

    Ok(ProductPage {
      products,
      total_pages: total_pages(total, request.limit),
      current_page: request.page,
      total_products: total,
      categories,
    })
  }

  /// Searches by free text. Every product on the returned page gets one
  /// impression before the page is returned.
  #[instrument(name = "catalog::search", skip(self), fields(page = request.page, limit = request.limit), err(Display))]
  pub async fn search(&self, query: Option<&str>, request: PageRequest) -> CatalogResult<ProductPage> {
    let condition = build_search_condition(query);
    debug!(?condition, "Built search condition.");

    let page = self.fetch_page(&condition, request).await?;
    let ids: Vec<Uuid> = page.products.iter().map(|product| product.id).collect();
    self.impressions.record(&ids).await?;

    info!(
      total = page.total_products,
      returned = page.products.len(),
      "Search completed."
    );
    Ok(page)
  }

  #[instrument(name = "catalog::list_all", skip(self), fields(page = request.page, limit = request.limit), err(Display))]
  pub async fn list_all(&self, request: PageRequest, category: &CategoryFilter) -> CatalogResult<ProductPage> {
    let condition = match category {
      CategoryFilter::All => SearchCondition::All,
      CategoryFilter::Named(name) => SearchCondition::Category(name.clone()),
    };
    let page = self.fetch_page(&condition, request).await?;
    debug!(total = page.total_products, returned = page.products.len(), "Listed products.");
    Ok(page)
  }

  /// Up to five distinct product names for autocomplete.
  #[instrument(name = "catalog::suggest", skip(self), err(Display))]
  pub async fn suggest(&self, query: Option<&str>) -> CatalogResult<Vec<String>> {
    let Some(query) = query.map(str::trim).filter(|q| q.chars().count() >= MIN_SUGGESTION_CHARS) else {
      return Ok(Vec::new());
    };
    let names = self
      .store
      .distinct_names(&suggestion_condition(query), SUGGESTION_LIMIT)
      .await?;

    let mut seen = HashSet::new();
    Ok(
      names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .take(SUGGESTION_LIMIT as usize)
        .collect(),
    )
  }

  #[instrument(name = "catalog::trending", skip(self), fields(metric = %request.metric, limit = request.limit), err(Display))]
  pub async fn trending(&self, request: TrendingRequest) -> CatalogResult<Vec<Product>> {
    let products = self.store.top_by(request.metric, request.limit).await?;
    Ok(dedupe_by_id(products, |product: &Product| product.id))
  }

  /// Replaces the whole collection with the sample catalog.
  ///
  /// Only serialized against other seeds in this process; two processes
  /// seeding at once can still interleave their delete and insert.
  #[instrument(name = "catalog::seed", skip(self), err(Display))]
  pub async fn seed(&self) -> CatalogResult<SeedReport> {
    let _guard = self.seed_lock.lock().await;
    self.seed_locked().await
  }

  /// Seeds only when the collection is empty. Returns `None` if it was not.
  #[instrument(name = "catalog::seed_if_empty", skip(self), err(Display))]
  pub async fn seed_if_empty(&self) -> CatalogResult<Option<SeedReport>> {
    let _guard = self.seed_lock.lock().await;
    let existing = self.store.count(&SearchCondition::All).await?;
    if existing > 0 {
      debug!(existing, "Collection already populated, skipping seed.");
      return Ok(None);
    }
    self.seed_locked().await.map(Some)
  }

  async fn seed_locked(&self) -> CatalogResult<SeedReport> {
    let products = sample_products(&mut rand::thread_rng());
    let count = self.store.replace_all(products).await?;
    info!(count, "Seeded sample products.");
    Ok(SeedReport {
      message: SEED_MESSAGE.to_string(),
      count,
    })
  }

  pub async fn close(&self) {
    self.store.close().await;
  }
}
