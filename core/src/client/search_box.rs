// core/src/client/search_box.rs

use super::api::CatalogApi;
use super::controller::CatalogController;

pub const SEARCH_PLACEHOLDER: &str = "Search for products...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBoxView {
  pub text: String,
  pub placeholder: &'static str,
  pub show_clear_button: bool,
  /// Empty when the panel is closed.
  pub suggestions: Vec<String>,
}

/// Search input with an autocomplete panel. Only the panel's open/closed flag
/// is local; text and suggestions live in the controller.
pub struct SearchBox<A: CatalogApi> {
  controller: CatalogController<A>,
  show_suggestions: bool,
}

impl<A: CatalogApi> SearchBox<A> {
  pub fn new(controller: CatalogController<A>) -> Self {
    Self {
      controller,
      show_suggestions: false,
    }
  }

  pub fn controller(&self) -> &CatalogController<A> {
    &self.controller
  }

  pub fn is_open(&self) -> bool {
    self.show_suggestions
  }

  pub async fn on_input(&mut self, text: impl Into<String>) {
    self.show_suggestions = true;
    self.controller.set_query(text).await;
  }

  pub fn on_focus(&mut self) {
    if !self.controller.snapshot().suggestions.is_empty() {
      self.show_suggestions = true;
    }
  }

  pub fn on_outside_click(&mut self) {
    self.show_suggestions = false;
  }

  pub async fn on_select(&mut self, suggestion: impl Into<String>) {
    self.show_suggestions = false;
    self.controller.select_suggestion(suggestion).await;
  }

  /// Submitting a blank box goes back to the full listing; otherwise the
  /// search already ran on input.
  pub async fn on_submit(&mut self) {
    self.show_suggestions = false;
    if self.controller.snapshot().query.trim().is_empty() {
      self.controller.clear_search().await;
    }
  }

  pub async fn on_clear(&mut self) {
    self.show_suggestions = false;
    self.controller.clear_search().await;
  }

  pub fn view(&self) -> SearchBoxView {
    let state = self.controller.snapshot();
    let suggestions = if self.show_suggestions {
      state.suggestions
    } else {
      Vec::new()
    };
    SearchBoxView {
      show_clear_button: !state.query.is_empty(),
      text: state.query,
      placeholder: SEARCH_PLACEHOLDER,
      suggestions,
    }
  }
}
