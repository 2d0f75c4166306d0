pub mod config;
pub mod security;

use std::path::PathBuf;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use postbox_api::pages;
use postbox_api::state::AppState;
use postbox_api::submit;

/// Largest accepted submission body, matching the usual form-parser default.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Directories the static asset server reads from.
#[derive(Debug, Clone)]
pub struct StaticDirs {
    /// Served at the site root (`/index.html`, ...).
    pub public: PathBuf,
    /// Served under `/scripts`.
    pub scripts: PathBuf,
}

/// Compose the whole HTTP surface around an already-built state.
pub fn build_router(state: AppState, dirs: &StaticDirs) -> Router {
    let public = ServeDir::new(&dirs.public)
        .call_fallback_on_method_not_allowed(true)
        .fallback(pages::not_found.into_service());
    let scripts = ServeDir::new(&dirs.scripts)
        .call_fallback_on_method_not_allowed(true)
        .fallback(pages::not_found.into_service());

    let app = Router::new()
        .route("/", get(pages::root).fallback(pages::not_found))
        .route("/submit", post(submit::submit).fallback(pages::not_found))
        .nest_service("/scripts", scripts)
        .fallback_service(public)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state);

    security::apply_headers(app).layer(TraceLayer::new_for_http())
}
