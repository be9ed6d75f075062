//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpRequest, HttpResponse, web};

use quill_core::DomainError;

use crate::respond;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            ),
    );
}

/// Fallback for unmatched routes, so even misses use the envelope.
pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    respond::failure(DomainError::NotFound {
        entity_type: "Route",
        id: req.path().to_string(),
    })
}
