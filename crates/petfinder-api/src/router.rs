use std::path::PathBuf;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers;
use crate::state::AppState;

/// Builds the application router; `storage_root` is served under `/storage` when set.
pub fn build_router(state: AppState, storage_root: Option<PathBuf>) -> Router {
    // Public routes (no authentication)
    let public_routes = Router::new()
        .route("/", get(handlers::landing::landing))
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route("/scan/{pet_id}", get(handlers::scan::scan_profile));

    // Owner routes (Bearer token, enforced by the AuthSession extractor)
    let pet_routes = Router::new()
        .route(
            "/api/v1/pets",
            get(handlers::pets::list_pets).post(handlers::pets::create_pet),
        )
        .route(
            "/api/v1/pets/{pet_id}",
            get(handlers::pets::get_pet)
                .patch(handlers::pets::update_pet)
                .delete(handlers::pets::delete_pet),
        )
        .route("/api/v1/pets/{pet_id}/qr", post(handlers::qr::generate_qr))
        .route("/api/v1/pets/{pet_id}/qr.png", get(handlers::qr::download_qr));

    let mut app = Router::new()
        .merge(public_routes)
        .merge(pet_routes)
        .with_state(state);

    if let Some(root) = storage_root {
        app = app.nest_service("/storage", ServeDir::new(root));
    }

    app.layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
}
