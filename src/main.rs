mod bootstrap;
mod config;
mod docs;
mod initializer;
mod routes;
mod state;
mod ui_config;

use std::process::ExitCode;

use axum::body::Bytes;

use crate::config::DocsConfig;
use crate::initializer::{INITIALIZER_PATH, PageAssets, SwaggerUiFactory};
use crate::state::{AppState, RouteOptions, UI};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = match DocsConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Documents that fail to load are skipped; the UI reports them.
    let store = docs::load_store(&config.sources, &config.openapi_path, &config.group_query_name, config.fetch_timeout).await;
    if store.is_empty() {
        tracing::warn!("no OpenAPI documents loaded; the UI will show a load error");
    } else {
        tracing::info!(groups = store.len(), "OpenAPI documents ready");
    }

    let ui_config = config.ui_configuration(&store);
    let factory = SwaggerUiFactory {
        kind: config.ui_kind,
        assets: PageAssets { base_url: config.asset_base_url.clone(), initializer_path: INITIALIZER_PATH.into() },
    };
    let ui = match UI.run(&factory, ui_config) {
        Ok(ui) => ui,
        Err(e) => {
            tracing::error!(error = %e, "ui bootstrap failed");
            return ExitCode::FAILURE;
        }
    };

    let license = match &config.license_file {
        Some(path) => match tokio::fs::read(path).await {
            Ok(bytes) => Some(Bytes::from(bytes)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "license file not readable; /docs/LICENSE disabled");
                None
            }
        },
        None => None,
    };

    let route_options = RouteOptions {
        docs_path: config.docs_path.clone(),
        openapi_path: config.openapi_path.clone(),
        prod: config.prod,
    };
    let state = AppState::new(ui, store, license, route_options);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(
        port = config.port,
        ui = config.ui_kind.as_str(),
        docs_path = %config.docs_path,
        "apidocs listening"
    );
    axum::serve(listener, app).await.expect("server failed");
    ExitCode::SUCCESS
}
