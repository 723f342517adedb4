//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the docs UI shell, its bootstrap script and JSON
//! config, the optional LICENSE, and the OpenAPI documents themselves. The UI
//! assets (bundle, stylesheet) load from the configured CDN base URL.

pub mod docs;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::initializer::INITIALIZER_PATH;
use crate::state::AppState;

pub const CONFIG_PATH: &str = "/docs/config";
pub const LICENSE_PATH: &str = "/docs/LICENSE";
pub const HEALTHZ_PATH: &str = "/healthz";

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let docs_path = state.routes.docs_path.clone();
    let openapi_path = state.routes.openapi_path.clone();

    let mut router = Router::new()
        .route(&docs_path, get(docs::docs_page))
        .route(INITIALIZER_PATH, get(docs::initializer_script))
        .route(CONFIG_PATH, get(docs::docs_config))
        .route(&openapi_path, get(docs::openapi_document))
        .route(HEALTHZ_PATH, get(healthz));

    if !state.routes.prod && docs_path != "/" {
        router = router.route("/", get(docs::redirect_to_docs));
    }
    if state.license.is_some() {
        router = router.route(LICENSE_PATH, get(docs::license));
    }

    router
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
