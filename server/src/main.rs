// server/src/main.rs

mod config;
mod errors;
mod state;
mod web;

use crate::config::AppConfig;
use crate::state::AppState;

use actix_cors::Cors;
use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use catalog::{CatalogService, PgProductStore};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting catalog server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(e).context("Configuration error");
    }
  };

  // Unreachable database is fatal; there is no retry.
  let store = PgProductStore::connect(&app_config.database_url, app_config.database_max_connections)
    .await
    .context("Database connection error")?;
  store.ensure_schema().await.context("Failed to prepare the products schema")?;
  let catalog = Arc::new(CatalogService::new(Arc::new(store)));

  if app_config.seed_db {
    match catalog.seed_if_empty().await {
      Ok(Some(report)) => tracing::info!(count = report.count, "Seeded empty catalog on startup."),
      Ok(None) => tracing::info!("Catalog already populated, startup seed skipped."),
      Err(e) => tracing::error!(error = %e, "Failed to seed database on startup."),
    }
  }

  let app_state = AppState::new(catalog.clone());

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(Cors::permissive())
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await?;

  catalog.close().await;
  tracing::info!("Server stopped, database pool closed.");
  Ok(())
}
