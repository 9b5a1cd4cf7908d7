// core/src/client/state.rs

use crate::models::{Product, ProductPage, ProductSummary};
use crate::params::CategoryFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
  pub current_page: u64,
  pub total_pages: u64,
  pub total_products: u64,
}

impl Default for PaginationState {
  fn default() -> Self {
    Self {
      current_page: 1,
      total_pages: 1,
      total_products: 0,
    }
  }
}

impl From<&ProductPage> for PaginationState {
  fn from(page: &ProductPage) -> Self {
    Self {
      current_page: page.current_page,
      total_pages: page.total_pages,
      total_products: page.total_products,
    }
  }
}

/// Everything the views render from. Snapshots are plain clones.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientState {
  pub query: String,
  pub results: Vec<ProductSummary>,
  pub pagination: PaginationState,
  pub suggestions: Vec<String>,
  pub trending: Vec<Product>,
  pub loading: bool,
  pub categories: Vec<String>,
  pub category: CategoryFilter,
}

impl Default for ClientState {
  fn default() -> Self {
    // The first listing is in flight as soon as the client starts.
    Self {
      query: String::new(),
      results: Vec::new(),
      pagination: PaginationState::default(),
      suggestions: Vec::new(),
      trending: Vec::new(),
      loading: true,
      categories: Vec::new(),
      category: CategoryFilter::All,
    }
  }
}

impl ClientState {
  pub fn is_searching(&self) -> bool {
    !self.query.trim().is_empty()
  }
}
