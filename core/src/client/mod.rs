// core/src/client/mod.rs

//! Headless catalog client: an API abstraction, the state controller, and the
//! view models built from its state.

pub mod api;
pub mod controller;
pub mod http;
pub mod pagination;
pub mod results;
pub mod search_box;
pub mod state;

pub use api::CatalogApi;
pub use controller::{CatalogController, ControllerConfig, DEFAULT_SUGGESTION_DEBOUNCE};
pub use http::{HttpCatalogApi, DEFAULT_API_BASE_URL};
pub use pagination::{page_window, PageItem, MAX_PAGE_BUTTONS};
pub use results::{format_price, trending_cards, CategoryOption, PaginationControls, ProductCard, ResultsView};
pub use search_box::{SearchBox, SearchBoxView};
pub use state::{ClientState, PaginationState};
