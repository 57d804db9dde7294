//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - REST-ish API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers), adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // Health + catalog
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/catalog/domains", get(http::http_catalog_domains))
        .route("/api/v1/catalog/categories", get(http::http_catalog_categories))
        .route(
            "/api/v1/catalog/subcategories",
            get(http::http_catalog_subcategories),
        )
        // Wizard lifecycle
        .route("/api/v1/wizard", post(http::http_create_wizard))
        .route("/api/v1/wizard/:id", get(http::http_get_wizard))
        .route("/api/v1/wizard/:id/domain", post(http::http_set_domain))
        .route("/api/v1/wizard/:id/categories", post(http::http_set_categories))
        .route("/api/v1/wizard/:id/articles", post(http::http_set_articles))
        .route("/api/v1/wizard/:id/context", post(http::http_set_context))
        .route("/api/v1/wizard/:id/settings", post(http::http_set_settings))
        .route("/api/v1/wizard/:id/advance", post(http::http_advance))
        .route("/api/v1/wizard/:id/retreat", post(http::http_retreat))
        .route("/api/v1/wizard/:id/reset", post(http::http_reset))
        // Case pipeline
        .route("/api/v1/wizard/:id/generate", post(http::http_generate))
        .route("/api/v1/wizard/:id/classify", post(http::http_classify))
        .route("/api/v1/wizard/:id/draft", post(http::http_edit_draft))
        .route("/api/v1/wizard/:id/save", post(http::http_save))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}
