// core/src/store/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::ProductStore;
use crate::error::CatalogResult;
use crate::models::{NewProduct, Product, ProductSummary};
use crate::params::TrendingMetric;
use crate::query::{full_text_matches, text_terms, PatternFields, SearchCondition};

/// Product collection held in process memory.
///
/// Lock guards are never held across `.await` points.
#[derive(Debug, Default)]
pub struct InMemoryStore {
  products: RwLock<Vec<Product>>,
}

enum Matcher {
  All,
  Terms(Vec<String>),
  Pattern(Regex, PatternFields),
  Category(String),
}

impl Matcher {
  fn compile(condition: &SearchCondition) -> CatalogResult<Self> {
    Ok(match condition {
      SearchCondition::All => Matcher::All,
      SearchCondition::FullText { query } => Matcher::Terms(text_terms(query)),
      SearchCondition::Pattern { pattern, fields } => {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Matcher::Pattern(regex, *fields)
      }
      SearchCondition::Category(category) => Matcher::Category(category.clone()),
    })
  }

  fn matches(&self, product: &Product) -> bool {
    match self {
      Matcher::All => true,
      Matcher::Terms(terms) => full_text_matches(terms, &[&product.name, &product.description, &product.category]),
      Matcher::Pattern(regex, PatternFields::NameOrCategory) => {
        regex.is_match(&product.name) || regex.is_match(&product.category)
      }
      Matcher::Pattern(regex, PatternFields::Name) => regex.is_match(&product.name),
      Matcher::Category(category) => product.category == *category,
    }
  }
}

fn by_metric_desc(metric: TrendingMetric) -> impl Fn(&&Product, &&Product) -> Ordering {
  move |a, b| {
    let (left, right) = match metric {
      TrendingMetric::Views => (a.views, b.views),
      TrendingMetric::Likes => (a.likes, b.likes),
    };
    right.cmp(&left).then_with(|| a.id.cmp(&b.id))
  }
}

fn clamp_len(value: u64) -> usize {
  usize::try_from(value).unwrap_or(usize::MAX)
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: Vec<Product>) -> Self {
    Self {
      products: RwLock::new(products),
    }
  }

  /// Copy of the current collection, in insertion order.
  pub fn snapshot(&self) -> Vec<Product> {
    self.products.read().clone()
  }

  fn matching_sorted(&self, condition: &SearchCondition, metric: TrendingMetric) -> CatalogResult<Vec<Product>> {
    let matcher = Matcher::compile(condition)?;
    let guard = self.products.read();
    let mut matched: Vec<&Product> = guard.iter().filter(|product| matcher.matches(product)).collect();
    matched.sort_by(by_metric_desc(metric));
    Ok(matched.into_iter().cloned().collect())
  }
}

#[async_trait]
impl ProductStore for InMemoryStore {
  async fn count(&self, condition: &SearchCondition) -> CatalogResult<u64> {
    let matcher = Matcher::compile(condition)?;
    let count = self.products.read().iter().filter(|product| matcher.matches(product)).count();
    Ok(count as u64)
  }

  async fn find_page(&self, condition: &SearchCondition, skip: u64, limit: u64) -> CatalogResult<Vec<ProductSummary>> {
    let matched = self.matching_sorted(condition, TrendingMetric::Views)?;
    Ok(
      matched
        .iter()
        .skip(clamp_len(skip))
        .take(clamp_len(limit))
        .map(ProductSummary::from)
        .collect(),
    )
  }

  async fn distinct_categories(&self) -> CatalogResult<Vec<String>> {
    let categories: BTreeSet<String> = self.products.read().iter().map(|product| product.category.clone()).collect();
    Ok(categories.into_iter().collect())
  }

  async fn distinct_names(&self, condition: &SearchCondition, limit: u64) -> CatalogResult<Vec<String>> {
    let matched = self.matching_sorted(condition, TrendingMetric::Views)?;
    let mut seen = HashSet::new();
    Ok(
      matched
        .into_iter()
        .map(|product| product.name)
        .filter(|name| seen.insert(name.clone()))
        .take(clamp_len(limit))
        .collect(),
    )
  }

  async fn top_by(&self, metric: TrendingMetric, limit: u64) -> CatalogResult<Vec<Product>> {
    let mut ranked = self.matching_sorted(&SearchCondition::All, metric)?;
    ranked.truncate(clamp_len(limit));
    Ok(ranked)
  }

  #[instrument(name = "memory_store::increment_views", skip(self, ids), fields(id_count = ids.len()))]
  async fn increment_views(&self, ids: &[Uuid]) -> CatalogResult<u64> {
    let wanted: HashSet<&Uuid> = ids.iter().collect();
    let mut updated = 0;
    for product in self.products.write().iter_mut() {
      if wanted.contains(&product.id) {
        product.views = product.views.saturating_add(1);
        updated += 1;
      }
    }
    debug!(updated, "Incremented view counters.");
    Ok(updated)
  }

  #[instrument(name = "memory_store::replace_all", skip(self, products), fields(count = products.len()))]
  async fn replace_all(&self, products: Vec<NewProduct>) -> CatalogResult<usize> {
    let now = Utc::now();
    let materialized = products
      .into_iter()
      .map(|product| product.into_product(now))
      .collect::<CatalogResult<Vec<_>>>()?;
    let count = materialized.len();
    *self.products.write() = materialized;
    debug!(count, "Replaced in-memory collection.");
    Ok(count)
  }

  async fn close(&self) {}
}
