// core/src/client/controller.rs

//! Client-side state and the rules that drive catalog requests from user input.
//!
//! Every results, trending and suggestion fetch is tagged with a generation
//! number. A response is applied only if its generation is still the latest,
//! so a slow, superseded request can never overwrite newer state.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use super::api::CatalogApi;
use super::state::{ClientState, PaginationState};
use crate::params::{CategoryFilter, TrendingMetric, DEFAULT_PAGE_SIZE, DEFAULT_TRENDING_LIMIT, MIN_SUGGESTION_CHARS};

pub const DEFAULT_SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct ControllerConfig {
  pub page_size: u64,
  pub trending_metric: TrendingMetric,
  pub trending_limit: u64,
  pub suggestion_debounce: Duration,
}

impl Default for ControllerConfig {
  fn default() -> Self {
    Self {
      page_size: DEFAULT_PAGE_SIZE,
      trending_metric: TrendingMetric::Views,
      trending_limit: DEFAULT_TRENDING_LIMIT,
      suggestion_debounce: DEFAULT_SUGGESTION_DEBOUNCE,
    }
  }
}

#[derive(Debug, Clone)]
enum ResultsRequest {
  Search { query: String, page: u64 },
  List { page: u64, category: CategoryFilter },
}

pub struct CatalogController<A: CatalogApi> {
  api: Arc<A>,
  config: ControllerConfig,
  state: Arc<Mutex<ClientState>>,
  results_generation: Arc<AtomicU64>,
  trending_generation: Arc<AtomicU64>,
  suggestion_generation: Arc<AtomicU64>,
  pending_suggestions: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<A: CatalogApi> Clone for CatalogController<A> {
  fn clone(&self) -> Self {
    Self {
      api: Arc::clone(&self.api),
      config: self.config.clone(),
      state: Arc::clone(&self.state),
      results_generation: Arc::clone(&self.results_generation),
      trending_generation: Arc::clone(&self.trending_generation),
      suggestion_generation: Arc::clone(&self.suggestion_generation),
      pending_suggestions: Arc::clone(&self.pending_suggestions),
    }
  }
}

impl<A: CatalogApi> CatalogController<A> {
  pub fn new(api: A) -> Self {
    Self::with_config(Arc::new(api), ControllerConfig::default())
  }

  pub fn with_config(api: Arc<A>, config: ControllerConfig) -> Self {
    Self {
      api,
      config,
      state: Arc::new(Mutex::new(ClientState::default())),
      results_generation: Arc::new(AtomicU64::new(0)),
      trending_generation: Arc::new(AtomicU64::new(0)),
      suggestion_generation: Arc::new(AtomicU64::new(0)),
      pending_suggestions: Arc::new(Mutex::new(None)),
    }
  }

  pub fn api(&self) -> &Arc<A> {
    &self.api
  }

  pub fn config(&self) -> &ControllerConfig {
    &self.config
  }

  pub fn snapshot(&self) -> ClientState {
    self.state.lock().clone()
  }

  /// Initial load: seed an empty catalog, then fetch the first page and the
  /// trending list together.
  #[instrument(name = "controller::initialize", skip(self))]
  pub async fn initialize(&self) {
    self.seed_if_needed().await;
    let first_page = self.fetch_results(ResultsRequest::List {
      page: 1,
      category: CategoryFilter::All,
    });
    futures_util::future::join(first_page, self.fetch_trending()).await;
  }

  async fn seed_if_needed(&self) {
    match self.api.list_all(1, self.config.page_size, &CategoryFilter::All).await {
      Ok(page) if page.total_products > 0 => {
        debug!(total = page.total_products, "Catalog already populated.");
        return;
      }
      Ok(_) => info!("Catalog is empty, seeding sample products."),
      Err(e) => warn!(error = %e, "Could not check the catalog, attempting to seed."),
    }
    match self.api.seed().await {
      Ok(report) => info!(count = report.count, "Catalog seeded with sample products."),
      Err(e) => error!(error = %e, "Error seeding catalog."),
    }
  }

  /// Replaces the query text. The category resets to all; a non-blank query
  /// searches from page 1, a blank one goes back to the full listing.
  pub async fn set_query(&self, text: impl Into<String>) {
    let text = text.into();
    {
      let mut state = self.state.lock();
      state.query = text.clone();
      state.category = CategoryFilter::All;
    }
    self.schedule_suggestions(&text);

    let request = if text.trim().is_empty() {
      ResultsRequest::List {
        page: 1,
        category: CategoryFilter::All,
      }
    } else {
      ResultsRequest::Search { query: text, page: 1 }
    };
    self.fetch_results(request).await;
  }

  pub async fn select_suggestion(&self, suggestion: impl Into<String>) {
    self.set_query(suggestion).await;
  }

  pub async fn clear_search(&self) {
    {
      let mut state = self.state.lock();
      state.query.clear();
      state.category = CategoryFilter::All;
    }
    self.cancel_suggestions();
    self
      .fetch_results(ResultsRequest::List {
        page: 1,
        category: CategoryFilter::All,
      })
      .await;
  }

  pub async fn change_category(&self, category: CategoryFilter) {
    let request = {
      let mut state = self.state.lock();
      state.category = category.clone();
      if state.is_searching() {
        ResultsRequest::Search {
          query: state.query.clone(),
          page: 1,
        }
      } else {
        ResultsRequest::List { page: 1, category }
      }
    };
    self.fetch_results(request).await;
  }

  pub async fn change_page(&self, page: u64) {
    let page = page.max(1);
    let request = {
      let state = self.state.lock();
      if state.is_searching() {
        ResultsRequest::Search {
          query: state.query.clone(),
          page,
        }
      } else {
        ResultsRequest::List {
          page,
          category: state.category.clone(),
        }
      }
    };
    self.fetch_results(request).await;
  }

  pub async fn refresh_trending(&self) {
    self.fetch_trending().await;
  }

  async fn fetch_results(&self, request: ResultsRequest) {
    let generation = {
      let mut state = self.state.lock();
      state.loading = true;
      self.results_generation.fetch_add(1, Ordering::SeqCst) + 1
    };

    let outcome = match &request {
      ResultsRequest::Search { query, page } => self.api.search(query, *page, self.config.page_size).await,
      ResultsRequest::List { page, category } => self.api.list_all(*page, self.config.page_size, category).await,
    };

    let mut state = self.state.lock();
    if self.results_generation.load(Ordering::SeqCst) != generation {
      debug!(generation, ?request, "Discarding superseded results.");
      return;
    }
    match outcome {
      Ok(page) => {
        state.pagination = PaginationState::from(&page);
        if !page.categories.is_empty() {
          state.categories = page.categories;
        }
        state.results = page.products;
      }
      Err(e) => {
        error!(error = %e, ?request, "Error fetching products.");
        state.results.clear();
        state.pagination = PaginationState::default();
      }
    }
    state.loading = false;
  }

  async fn fetch_trending(&self) {
    let generation = self.trending_generation.fetch_add(1, Ordering::SeqCst) + 1;
    let outcome = self
      .api
      .trending(self.config.trending_metric, self.config.trending_limit)
      .await;

    let mut state = self.state.lock();
    if self.trending_generation.load(Ordering::SeqCst) != generation {
      debug!(generation, "Discarding superseded trending products.");
      return;
    }
    match outcome {
      Ok(products) => state.trending = products,
      Err(e) => {
        error!(error = %e, "Error fetching trending products.");
        state.trending.clear();
      }
    }
  }

  /// Invalidates any scheduled or in-flight suggestion fetch.
  fn cancel_suggestions(&self) {
    let mut pending = self.pending_suggestions.lock();
    {
      let mut state = self.state.lock();
      state.suggestions.clear();
      self.suggestion_generation.fetch_add(1, Ordering::SeqCst);
    }
    if let Some(handle) = pending.take() {
      handle.abort();
    }
  }

  fn schedule_suggestions(&self, text: &str) {
    let query = text.trim().to_string();
    if query.chars().count() < MIN_SUGGESTION_CHARS {
      self.cancel_suggestions();
      return;
    }
    // The generation bump and the handle swap happen under one lock, so the
    // stored handle always belongs to the latest generation.
    let mut pending = self.pending_suggestions.lock();
    let generation = self.suggestion_generation.fetch_add(1, Ordering::SeqCst) + 1;
    if let Some(handle) = pending.take() {
      handle.abort();
    }

    let controller = self.clone();
    let handle = tokio::spawn(async move {
      tokio::time::sleep(controller.config.suggestion_debounce).await;
      if controller.suggestion_generation.load(Ordering::SeqCst) != generation {
        return;
      }
      let outcome = controller.api.suggestions(&query).await;

      let mut state = controller.state.lock();
      if controller.suggestion_generation.load(Ordering::SeqCst) != generation {
        debug!(generation, %query, "Discarding superseded suggestions.");
        return;
      }
      match outcome {
        Ok(suggestions) => state.suggestions = suggestions,
        Err(e) => {
          error!(error = %e, %query, "Error fetching suggestions.");
          state.suggestions.clear();
        }
      }
    });
    *pending = Some(handle);
  }
}
