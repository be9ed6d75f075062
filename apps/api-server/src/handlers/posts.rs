//! Post handlers - thin adapters over [`quill_core::PostService`].

use actix_web::{HttpResponse, web};

use crate::respond::{failure, into_http, parse_json};
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> HttpResponse {
    into_http(state.posts.list().await)
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    into_http(state.posts.get(&path.into_inner()).await)
}

/// POST /api/posts
pub async fn create_post(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    match parse_json(&body) {
        Ok(payload) => into_http(state.posts.create(&payload).await),
        Err(err) => failure(err),
    }
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    match parse_json(&body) {
        Ok(payload) => into_http(state.posts.update(&path.into_inner(), &payload).await),
        Err(err) => failure(err),
    }
}

/// DELETE /api/posts/{id}
pub async fn delete_post(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    into_http(state.posts.delete(&path.into_inner()).await)
}
