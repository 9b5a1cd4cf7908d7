// core/src/service/mod.rs

pub mod catalog;
pub mod impressions;

pub use catalog::CatalogService;
pub use impressions::{ImpressionRecorder, StoreImpressionRecorder};
