//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! UI handle and the document store are fixed after startup, so everything
//! is shared behind `Arc` without locks.

use std::sync::Arc;

use axum::body::Bytes;

use crate::bootstrap::Bootstrapper;
use crate::docs::DocStore;
use crate::initializer::DocsUi;

/// The process-wide UI handle, published once by `main`.
pub static UI: Bootstrapper<DocsUi> = Bootstrapper::new();

/// Paths and switches the router is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOptions {
    pub docs_path: String,
    pub openapi_path: String,
    pub prod: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub ui: Arc<DocsUi>,
    pub docs: Arc<DocStore>,
    pub license: Option<Bytes>,
    pub routes: Arc<RouteOptions>,
}

impl AppState {
    #[must_use]
    pub fn new(ui: Arc<DocsUi>, docs: DocStore, license: Option<Bytes>, routes: RouteOptions) -> Self {
        Self { ui, docs: Arc::new(docs), license, routes: Arc::new(routes) }
    }
}
