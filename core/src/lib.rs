// src/lib.rs

//! Catalog: product search, listing, autocomplete and trending over a single
//! product collection.
//!
//! The crate is split into:
//!  - `store`: the persistence boundary, with PostgreSQL and in-memory backends.
//!  - `service`: the query service behind the five catalog operations.
//!  - `client`: a headless client controller plus the view models it drives.

pub mod client;
pub mod error;
pub mod models;
pub mod params;
pub mod query;
pub mod seed;
pub mod service;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::error::{CatalogError, CatalogResult};

pub use crate::models::{NewProduct, Product, ProductPage, ProductSummary, SeedReport};
pub use crate::params::{CategoryFilter, PageRequest, TrendingMetric, TrendingRequest};
pub use crate::query::SearchCondition;

pub use crate::service::{CatalogService, ImpressionRecorder, StoreImpressionRecorder};
pub use crate::store::{InMemoryStore, PgProductStore, ProductStore};

pub use crate::client::{CatalogApi, CatalogController, HttpCatalogApi};
