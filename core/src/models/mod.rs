// core/src/models/mod.rs

//! Data structures for the product collection and the payloads built from it.

pub mod product;
pub mod responses;

pub use product::{NewProduct, Product, ProductSummary, DEFAULT_PRODUCT_IMAGE};
pub use responses::{total_pages, ProductPage, SeedReport};
