// tests/controller_tests.rs
mod common;

use catalog::client::{CatalogController, ControllerConfig, PaginationState};
use catalog::CategoryFilter;
use common::*;
use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

const PAST_DEBOUNCE: Duration = Duration::from_millis(350);

fn as_set(items: &[String]) -> HashSet<String> {
  items.iter().cloned().collect()
}

#[tokio::test(start_paused = true)]
async fn test_initialize_seeds_an_empty_catalog() {
  setup_tracing();
  let controller = CatalogController::new(MockCatalogApi::empty());

  controller.initialize().await;

  let state = controller.snapshot();
  assert_eq!(controller.api().count_calls("seed"), 1);
  assert!(!state.loading);
  assert_eq!(state.results.len(), 6);
  assert_eq!(state.pagination.total_products, 10);
  assert_eq!(state.pagination.total_pages, 2);
  assert_eq!(state.trending.len(), 5);
  assert_eq!(state.categories.len(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_initialize_skips_seed_when_populated() {
  let controller = CatalogController::new(MockCatalogApi::seeded().await);

  controller.initialize().await;

  assert_eq!(controller.api().count_calls("seed"), 0);
  assert_eq!(controller.snapshot().results.len(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_initialize_seeds_when_first_listing_fails() {
  let api = MockCatalogApi::empty();
  api.fail_results.store(true, Ordering::SeqCst);
  let controller = CatalogController::new(api);

  controller.initialize().await;

  let state = controller.snapshot();
  assert_eq!(controller.api().count_calls("seed"), 1);
  // Listing still fails, trending does not.
  assert!(state.results.is_empty());
  assert_eq!(state.pagination, PaginationState::default());
  assert!(!state.loading);
  assert_eq!(state.trending.len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_set_query_searches_from_first_page_and_resets_category() {
  let controller = CatalogController::new(MockCatalogApi::seeded().await);
  controller.initialize().await;
  controller.change_category(CategoryFilter::Named("Audio".to_string())).await;

  controller.set_query("laptop").await;

  let state = controller.snapshot();
  assert_eq!(state.query, "laptop");
  assert_eq!(state.category, CategoryFilter::All);
  assert_eq!(state.results.len(), 1);
  assert_eq!(state.results[0].name, "Laptop Pro");
  assert_eq!(controller.api().calls().last().map(String::as_str), Some("search:laptop:1"));
}

#[tokio::test(start_paused = true)]
async fn test_blank_query_returns_to_listing() {
  let controller = CatalogController::new(MockCatalogApi::seeded().await);
  controller.set_query("laptop").await;

  controller.set_query("   ").await;

  let state = controller.snapshot();
  assert_eq!(state.results.len(), 6);
  assert_eq!(state.pagination.total_products, 10);
  assert_eq!(controller.api().calls().last().map(String::as_str), Some("all:1:all"));
}

#[tokio::test(start_paused = true)]
async fn test_change_category_lists_or_searches() {
  let controller = CatalogController::new(MockCatalogApi::seeded().await);
  controller.initialize().await;

  controller.change_category(CategoryFilter::parse(Some("Audio"))).await;
  let state = controller.snapshot();
  assert_eq!(state.pagination.total_products, 3);
  assert!(state.results.iter().all(|p| p.category == "Audio"));
  assert_eq!(controller.api().calls().last().map(String::as_str), Some("all:1:Audio"));

  controller.set_query("wireless").await;
  controller.change_category(CategoryFilter::parse(Some("Kitchen"))).await;
  let state = controller.snapshot();
  // Searches ignore the category filter.
  assert_eq!(state.category, CategoryFilter::Named("Kitchen".to_string()));
  assert_eq!(controller.api().calls().last().map(String::as_str), Some("search:wireless:1"));
  assert_eq!(state.pagination.total_products, 3);
}

#[tokio::test(start_paused = true)]
async fn test_change_page_keeps_the_current_mode() {
  let controller = CatalogController::new(MockCatalogApi::seeded().await);
  controller.initialize().await;

  controller.change_page(2).await;
  let state = controller.snapshot();
  assert_eq!(state.pagination.current_page, 2);
  assert_eq!(state.results.len(), 4);
  assert_eq!(controller.api().calls().last().map(String::as_str), Some("all:2:all"));

  controller.set_query("smart").await;
  controller.change_page(0).await;
  assert_eq!(controller.api().calls().last().map(String::as_str), Some("search:smart:1"));
}

#[tokio::test(start_paused = true)]
async fn test_clear_search_resets_query_category_and_suggestions() {
  let controller = CatalogController::new(MockCatalogApi::seeded().await);
  controller.set_query("wireless").await;
  tokio::time::sleep(PAST_DEBOUNCE).await;
  assert!(!controller.snapshot().suggestions.is_empty());

  controller.change_category(CategoryFilter::parse(Some("Audio"))).await;
  controller.clear_search().await;

  let state = controller.snapshot();
  assert!(state.query.is_empty());
  assert_eq!(state.category, CategoryFilter::All);
  assert!(state.suggestions.is_empty());
  assert_eq!(state.pagination.total_products, 10);
  assert_eq!(controller.api().calls().last().map(String::as_str), Some("all:1:all"));
}

#[tokio::test(start_paused = true)]
async fn test_superseded_search_response_is_discarded() {
  setup_tracing();
  let controller = CatalogController::new(MockCatalogApi::seeded().await);
  controller.api().delay_search("laptop", Duration::from_millis(500));

  let slow = controller.set_query("laptop");
  let fast = async {
    tokio::time::sleep(Duration::from_millis(10)).await;
    controller.set_query("coffee").await;
  };
  tokio::join!(slow, fast);

  let state = controller.snapshot();
  assert_eq!(state.query, "coffee");
  assert_eq!(state.results.len(), 1);
  assert_eq!(state.results[0].name, "Coffee Maker");
  assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn test_suggestions_are_debounced() {
  let controller = CatalogController::new(MockCatalogApi::seeded().await);

  for text in ["w", "wi", "wir", "wire"] {
    controller.set_query(text).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
  }
  assert_eq!(controller.api().count_calls("suggestions:"), 0);

  tokio::time::sleep(PAST_DEBOUNCE).await;

  assert_eq!(controller.api().count_calls("suggestions:"), 1);
  assert!(controller.api().calls().contains(&"suggestions:wire".to_string()));
  assert_eq!(
    as_set(&controller.snapshot().suggestions),
    HashSet::from([
      "Wireless Headphones".to_string(),
      "Wireless Earbuds".to_string(),
      "Wireless Mouse".to_string(),
    ])
  );
}

#[tokio::test(start_paused = true)]
async fn test_debounce_is_configurable() {
  let config = ControllerConfig {
    suggestion_debounce: Duration::from_millis(20),
    ..ControllerConfig::default()
  };
  let controller = CatalogController::with_config(Arc::new(MockCatalogApi::seeded().await), config);

  controller.set_query("smart").await;
  tokio::time::sleep(Duration::from_millis(30)).await;

  assert_eq!(controller.snapshot().suggestions.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_short_query_clears_suggestions_without_request() {
  let controller = CatalogController::new(MockCatalogApi::seeded().await);
  controller.set_query("wire").await;
  tokio::time::sleep(PAST_DEBOUNCE).await;
  assert_eq!(controller.snapshot().suggestions.len(), 3);

  controller.set_query("w").await;

  assert!(controller.snapshot().suggestions.is_empty());
  tokio::time::sleep(PAST_DEBOUNCE).await;
  assert_eq!(controller.api().count_calls("suggestions:"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_suggestions_never_overwrite_newer_ones() {
  let controller = CatalogController::new(MockCatalogApi::seeded().await);
  controller.api().delay_suggestions("wi", Duration::from_secs(1));

  controller.set_query("wi").await;
  tokio::time::sleep(Duration::from_millis(400)).await;
  controller.set_query("smart").await;
  tokio::time::sleep(Duration::from_secs(2)).await;

  assert_eq!(
    as_set(&controller.snapshot().suggestions),
    HashSet::from([
      "Smartphone X".to_string(),
      "Smart Watch".to_string(),
      "Smart TV".to_string(),
    ])
  );
}

#[tokio::test(start_paused = true)]
async fn test_failed_fetches_clear_their_lists() {
  let controller = CatalogController::new(MockCatalogApi::seeded().await);
  controller.initialize().await;
  controller.set_query("wire").await;
  tokio::time::sleep(PAST_DEBOUNCE).await;

  let api = controller.api();
  api.fail_results.store(true, Ordering::SeqCst);
  api.fail_suggestions.store(true, Ordering::SeqCst);
  api.fail_trending.store(true, Ordering::SeqCst);

  controller.change_page(2).await;
  controller.refresh_trending().await;
  controller.set_query("smart").await;
  tokio::time::sleep(PAST_DEBOUNCE).await;

  let state = controller.snapshot();
  assert!(state.results.is_empty());
  assert_eq!(state.pagination, PaginationState::default());
  assert!(!state.loading);
  assert!(state.trending.is_empty());
  assert!(state.suggestions.is_empty());
  // Categories from the last good response survive.
  assert_eq!(state.categories.len(), 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_suggestions_scheduled_from_many_threads_still_arrive() {
  let controller = CatalogController::new(MockCatalogApi::seeded().await);
  let queries = ["wire", "Wire", "wirel", "wirele", "wireles", "wireless"];

  let tasks: Vec<_> = (0..24)
    .map(|i| {
      let controller = controller.clone();
      let query = queries[i % queries.len()];
      tokio::spawn(async move { controller.set_query(query).await })
    })
    .collect();
  for task in tasks {
    task.await.unwrap();
  }
  tokio::time::sleep(Duration::from_millis(600)).await;

  // Whichever query won, the latest scheduled fetch was not aborted.
  assert_eq!(
    as_set(&controller.snapshot().suggestions),
    HashSet::from([
      "Wireless Headphones".to_string(),
      "Wireless Earbuds".to_string(),
      "Wireless Mouse".to_string(),
    ])
  );
}

#[tokio::test(start_paused = true)]
async fn test_slow_trending_response_never_overwrites_newer_one() {
  let controller = CatalogController::new(MockCatalogApi::seeded().await);
  let api = controller.api();
  api.fail_trending.store(true, Ordering::SeqCst);
  api.delay_next_trending(Duration::from_millis(500));

  let stale = tokio::spawn({
    let controller = controller.clone();
    async move { controller.refresh_trending().await }
  });
  tokio::time::sleep(Duration::from_millis(10)).await;
  assert_eq!(api.count_calls("trending:"), 1);

  api.fail_trending.store(false, Ordering::SeqCst);
  controller.refresh_trending().await;
  assert_eq!(controller.snapshot().trending.len(), 5);

  // The first request fails late; its outcome is discarded.
  stale.await.unwrap();
  assert_eq!(controller.snapshot().trending.len(), 5);
}
