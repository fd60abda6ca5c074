use axum::{Router, extract::DefaultBodyLimit, routing::get};

use crate::state::AppState;

pub mod auth;
pub mod doc;
pub mod forms;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/create-product", forms::create_router())
        .nest("/edit-product", forms::edit_router())
        .nest("/orders", orders::route())
        .route("/taxonomy", get(products::list_taxonomy))
}

/// Health check plus the `/api` tree, with extracted bodies capped at
/// `max_upload_bytes` instead of axum's 2 MiB default.
pub fn create_app_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
