// core/src/client/results.rs

//! View models for the results area and the trending list.
//!
//! These are pure functions of a [`ClientState`] snapshot; rendering them is
//! left to whatever front end embeds the controller.

use super::pagination::{page_window, PageItem};
use super::state::{ClientState, PaginationState};
use crate::models::{Product, ProductSummary};

pub const ALL_CATEGORIES_VALUE: &str = "all";
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

/// `999.99` renders as `$999.99`, `5.0` as `$5.00`.
pub fn format_price(price: f64) -> String {
  format!("${price:.2}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
  pub image: String,
  pub name: String,
  pub description: String,
  pub price: String,
  pub category: String,
  pub views: i64,
  pub likes: i64,
}

impl From<&ProductSummary> for ProductCard {
  fn from(product: &ProductSummary) -> Self {
    Self {
      image: product.image.clone(),
      name: product.name.clone(),
      description: product.description.clone(),
      price: format_price(product.price),
      category: product.category.clone(),
      views: product.views,
      likes: product.likes,
    }
  }
}

impl From<&Product> for ProductCard {
  fn from(product: &Product) -> Self {
    ProductCard::from(&ProductSummary::from(product))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
  pub value: String,
  pub label: String,
  pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
  pub previous_enabled: bool,
  pub next_enabled: bool,
  pub previous_page: u64,
  pub next_page: u64,
  pub items: Vec<PageItem>,
}

impl PaginationControls {
  /// `None` when everything fits on one page.
  pub fn from_state(pagination: &PaginationState) -> Option<Self> {
    let PaginationState {
      current_page,
      total_pages,
      ..
    } = *pagination;
    if total_pages <= 1 {
      return None;
    }
    Some(Self {
      previous_enabled: current_page > 1,
      next_enabled: current_page < total_pages,
      previous_page: current_page.saturating_sub(1).max(1),
      next_page: (current_page + 1).min(total_pages),
      items: page_window(current_page, total_pages),
    })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
  Loading,
  NoResults {
    query: String,
  },
  Welcome,
  Listing {
    header: String,
    category_options: Vec<CategoryOption>,
    cards: Vec<ProductCard>,
    pagination: Option<PaginationControls>,
  },
}

impl ResultsView {
  pub fn from_state(state: &ClientState) -> Self {
    if state.loading {
      return ResultsView::Loading;
    }
    let searching = state.is_searching();
    if state.results.is_empty() {
      return if searching {
        ResultsView::NoResults {
          query: state.query.clone(),
        }
      } else {
        ResultsView::Welcome
      };
    }

    ResultsView::Listing {
      header: results_header(searching, state.pagination.total_products),
      category_options: category_options(state),
      cards: state.results.iter().map(ProductCard::from).collect(),
      pagination: PaginationControls::from_state(&state.pagination),
    }
  }

  pub fn is_loading(&self) -> bool {
    matches!(self, ResultsView::Loading)
  }
}

fn results_header(searching: bool, total_products: u64) -> String {
  match (searching, total_products) {
    (true, 0) => "Search Results".to_string(),
    (true, n) => format!("Search Results ({n} products found)"),
    (false, _) => "All Products".to_string(),
  }
}

fn category_options(state: &ClientState) -> Vec<CategoryOption> {
  if state.categories.is_empty() {
    return Vec::new();
  }
  let selected = state.category.selector_value();
  let mut options = Vec::with_capacity(state.categories.len() + 1);
  options.push(CategoryOption {
    value: ALL_CATEGORIES_VALUE.to_string(),
    label: ALL_CATEGORIES_LABEL.to_string(),
    selected: selected == ALL_CATEGORIES_VALUE,
  });
  options.extend(state.categories.iter().map(|category| CategoryOption {
    value: category.clone(),
    label: category.clone(),
    selected: category == selected,
  }));
  options
}

pub fn trending_cards(trending: &[Product]) -> Vec<ProductCard> {
  trending.iter().map(ProductCard::from).collect()
}
