// core/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

/// Image used when a product is created without one.
pub const DEFAULT_PRODUCT_IMAGE: &str = "https://via.placeholder.com/150";

/// A stored product, as returned by the trending endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
  #[serde(rename = "_id")]
  pub id: Uuid,
  pub name: String,
  pub description: String,
  pub price: f64,
  pub category: String,
  pub image: String,
  pub views: i64,
  pub likes: i64,
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
}

/// Display projection used by search and listing pages (no creation timestamp).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductSummary {
  #[serde(rename = "_id")]
  pub id: Uuid,
  pub name: String,
  pub description: String,
  pub price: f64,
  pub category: String,
  pub image: String,
  pub views: i64,
  pub likes: i64,
}

impl From<&Product> for ProductSummary {
  fn from(product: &Product) -> Self {
    Self {
      id: product.id,
      name: product.name.clone(),
      description: product.description.clone(),
      price: product.price,
      category: product.category.clone(),
      image: product.image.clone(),
      views: product.views,
      likes: product.likes,
    }
  }
}

/// Creation input. Identity and timestamp are assigned on insert.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProduct {
  pub name: String,
  pub description: String,
  pub price: f64,
  pub category: String,
  #[serde(default)]
  pub image: Option<String>,
  #[serde(default)]
  pub views: i64,
  #[serde(default)]
  pub likes: i64,
}

impl NewProduct {
  pub fn new(name: &str, description: &str, price: f64, category: &str) -> Self {
    Self {
      name: name.to_string(),
      description: description.to_string(),
      price,
      category: category.to_string(),
      image: None,
      views: 0,
      likes: 0,
    }
  }

  pub fn with_counters(mut self, views: i64, likes: i64) -> Self {
    self.views = views;
    self.likes = likes;
    self
  }

  pub fn validate(&self) -> CatalogResult<()> {
    for (field, value) in [
      ("name", &self.name),
      ("description", &self.description),
      ("category", &self.category),
    ] {
      if value.trim().is_empty() {
        return Err(CatalogError::invalid(field, "must not be empty"));
      }
    }
    if !self.price.is_finite() || self.price < 0.0 {
      return Err(CatalogError::invalid(
        "price",
        format!("must be a non-negative number, got {}", self.price),
      ));
    }
    if self.views < 0 {
      return Err(CatalogError::invalid("views", "must not be negative"));
    }
    if self.likes < 0 {
      return Err(CatalogError::invalid("likes", "must not be negative"));
    }
    Ok(())
  }

  /// Validates and materializes the product with a fresh id.
  pub fn into_product(self, created_at: DateTime<Utc>) -> CatalogResult<Product> {
    self.validate()?;
    Ok(Product {
      id: Uuid::new_v4(),
      name: self.name,
      description: self.description,
      price: self.price,
      category: self.category,
      image: self
        .image
        .filter(|image| !image.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string()),
      views: self.views,
      likes: self.likes,
      created_at,
    })
  }
}
