//! HTTP handlers and route configuration.

mod engagement;
mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_cors::Cors;
use actix_web::web;

use crate::middleware::error::json_error_handler;

/// JSON extractor settings: body size cap and JSON error bodies.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

/// Cross-origin policy for browser clients: any origin, method and header.
pub fn cors() -> Cors {
    Cors::permissive()
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/debug/posts", web::get().to(health::debug_posts))
            // Posts
            .route("/posts", web::get().to(posts::list_posts))
            .route("/posts", web::post().to(posts::create_post))
            .route("/posts/{id}/status", web::put().to(posts::update_status))
            .route("/posts/{id}", web::delete().to(posts::delete_post))
            .route("/scheduled-posts", web::get().to(posts::list_scheduled))
            // Callbacks from the workflow service
            .route("/webhook/engagement", web::post().to(engagement::engagement_webhook)),
    );
}
