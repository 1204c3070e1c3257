// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{assessment, response},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the assessment and response sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store handle and configuration).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&state.config.cors_origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let assessment_routes = Router::new()
        .route(
            "/",
            get(assessment::list_assessments).post(assessment::create_assessment),
        )
        .route("/import", post(assessment::import_assessment))
        .route(
            "/{id}",
            get(assessment::get_assessment)
                .put(assessment::update_assessment)
                .delete(assessment::delete_assessment),
        )
        .route("/{id}/with-answers", get(assessment::get_assessment_with_answers))
        .route("/{id}/summary", get(assessment::get_summary))
        .route("/{id}/export", get(assessment::export_results));

    let response_routes = Router::new()
        .route("/", post(response::submit_response))
        .route(
            "/{id}",
            get(response::get_response).delete(response::delete_response),
        )
        .route(
            "/assessment/{assessment_id}",
            get(response::list_responses_by_assessment),
        );

    Router::new()
        .route("/", get(|| async { "Assessment Platform API is running!" }))
        .nest("/api/assessments", assessment_routes)
        .nest("/api/responses", response_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn allowed_origins(configured: &[String]) -> AllowOrigin {
    if configured.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}
