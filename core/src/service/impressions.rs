// core/src/service/impressions.rs

//! Impression tracking: a product counts as viewed each time it is returned on
//! a search result page.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::store::ProductStore;

#[async_trait]
pub trait ImpressionRecorder: Send + Sync {
  async fn record(&self, ids: &[Uuid]) -> CatalogResult<()>;
}

/// Writes impressions straight into the products' `views` counters.
pub struct StoreImpressionRecorder {
  store: Arc<dyn ProductStore>,
}

impl StoreImpressionRecorder {
  pub fn new(store: Arc<dyn ProductStore>) -> Self {
    Self { store }
  }
}

#[async_trait]
impl ImpressionRecorder for StoreImpressionRecorder {
  async fn record(&self, ids: &[Uuid]) -> CatalogResult<()> {
    if ids.is_empty() {
      return Ok(());
    }
    self.store.increment_views(ids).await?;
    Ok(())
  }
}
