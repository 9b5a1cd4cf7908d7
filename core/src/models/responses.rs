// core/src/models/responses.rs

use serde::{Deserialize, Serialize};

use super::ProductSummary;

/// One page of search or listing results, plus the global category list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
  pub products: Vec<ProductSummary>,
  pub total_pages: u64,
  pub current_page: u64,
  pub total_products: u64,
  pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedReport {
  pub message: String,
  pub count: usize,
}

/// `ceil(total / limit)`; a zero limit yields zero pages.
pub fn total_pages(total: u64, limit: u64) -> u64 {
  if limit == 0 {
    return 0;
  }
  total.div_ceil(limit)
}
