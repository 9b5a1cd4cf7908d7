// server/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::product_handlers;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.route("/health", web::get().to(health_check_handler)).service(
    web::scope("/api/products")
      .route("/search", web::get().to(product_handlers::search_handler))
      .route("/all", web::get().to(product_handlers::list_all_handler))
      .route("/suggestions", web::get().to(product_handlers::suggestions_handler))
      .route("/trending", web::get().to(product_handlers::trending_handler))
      .route("/seed", web::post().to(product_handlers::seed_handler)),
  );
}
