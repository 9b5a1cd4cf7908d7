// server/src/state.rs
use catalog::CatalogService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<CatalogService>,
}

impl AppState {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }
}
