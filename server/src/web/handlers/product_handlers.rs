// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use catalog::{CategoryFilter, PageRequest, TrendingRequest};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::state::AppState;

// Parameters stay raw strings so a malformed number falls back to its
// default instead of failing extraction with a 400.

#[derive(Deserialize, Debug)]
pub struct SearchParams {
  pub query: Option<String>,
  pub page: Option<String>,
  pub limit: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ListParams {
  pub page: Option<String>,
  pub limit: Option<String>,
  pub category: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SuggestionParams {
  pub query: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct TrendingParams {
  pub metric: Option<String>,
  pub limit: Option<String>,
}

#[instrument(name = "handler::search", skip(app_state, params), fields(query = ?params.query))]
pub async fn search_handler(app_state: web::Data<AppState>, params: web::Query<SearchParams>) -> Result<HttpResponse> {
  let request = PageRequest::parse(params.page.as_deref(), params.limit.as_deref());
  let page = app_state
    .catalog
    .search(params.query.as_deref(), request)
    .await
    .map_err(AppError::catalog("Server error during search"))?;
  Ok(HttpResponse::Ok().json(page))
}

#[instrument(name = "handler::list_all", skip(app_state, params), fields(category = ?params.category))]
pub async fn list_all_handler(app_state: web::Data<AppState>, params: web::Query<ListParams>) -> Result<HttpResponse> {
  let request = PageRequest::parse(params.page.as_deref(), params.limit.as_deref());
  let category = CategoryFilter::parse(params.category.as_deref());
  let page = app_state
    .catalog
    .list_all(request, &category)
    .await
    .map_err(AppError::catalog("Server error fetching products"))?;
  Ok(HttpResponse::Ok().json(page))
}

#[instrument(name = "handler::suggestions", skip(app_state, params), fields(query = ?params.query))]
pub async fn suggestions_handler(
  app_state: web::Data<AppState>,
  params: web::Query<SuggestionParams>,
) -> Result<HttpResponse> {
  let suggestions = app_state
    .catalog
    .suggest(params.query.as_deref())
    .await
    .map_err(AppError::catalog("Server error getting suggestions"))?;
  Ok(HttpResponse::Ok().json(suggestions))
}

#[instrument(name = "handler::trending", skip(app_state, params))]
pub async fn trending_handler(app_state: web::Data<AppState>, params: web::Query<TrendingParams>) -> Result<HttpResponse> {
  let request = TrendingRequest::parse(params.metric.as_deref(), params.limit.as_deref());
  let products = app_state
    .catalog
    .trending(request)
    .await
    .map_err(AppError::catalog("Server error getting trending products"))?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::seed", skip(app_state))]
pub async fn seed_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let report = app_state
    .catalog
    .seed()
    .await
    .map_err(AppError::catalog("Error seeding database"))?;
  info!(count = report.count, "Database seeded via API.");
  Ok(HttpResponse::Ok().json(report))
}
