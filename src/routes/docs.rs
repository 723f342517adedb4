//! Docs UI and OpenAPI document routes.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION};
use axum::response::{Html, IntoResponse, Json, Response};

use crate::docs::DocError;
use crate::state::AppState;

/// `GET /`: 302 to the docs page (outside production only).
pub async fn redirect_to_docs(State(state): State<AppState>) -> Response {
    (StatusCode::FOUND, [(LOCATION, state.routes.docs_path.clone())]).into_response()
}

/// `GET {docs_path}`: HTML shell for the configured UI.
pub async fn docs_page(State(state): State<AppState>) -> Html<String> {
    Html(state.ui.page.clone())
}

/// `GET /docs/swagger-initializer.js`: one-shot bootstrap script.
pub async fn initializer_script(State(state): State<AppState>) -> Response {
    (
        [
            (CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (CACHE_CONTROL, "no-cache"),
        ],
        state.ui.initializer.clone(),
    )
        .into_response()
}

/// `GET /docs/config`: the UI configuration as JSON.
pub async fn docs_config(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.ui.config_json.clone())
}

/// `GET /docs/LICENSE`: registered only when a license file is configured.
pub async fn license(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let text = state.license.clone().ok_or(StatusCode::NOT_FOUND)?;
    Ok(([(CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response())
}

/// `GET {openapi_path}`: the document for the requested group, `default`
/// when the group query parameter is absent.
pub async fn openapi_document(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, StatusCode> {
    let group = params.get(state.docs.group_query_name()).map(String::as_str);
    let doc = state.docs.get(group).map_err(|e| {
        tracing::debug!(error = %e, "openapi document request rejected");
        doc_error_to_status(&e)
    })?;

    Ok(([(CONTENT_TYPE, doc.content_type)], doc.bytes.clone()).into_response())
}

pub(crate) fn doc_error_to_status(err: &DocError) -> StatusCode {
    match err {
        DocError::UnknownGroup(_) => StatusCode::NOT_FOUND,
        DocError::Read { .. } | DocError::Fetch(_) | DocError::Status { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "docs_test.rs"]
mod tests;
