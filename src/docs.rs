//! OpenAPI document store.
//!
//! DESIGN
//! ======
//! Documents are opaque bytes grouped by name. They are loaded once at startup
//! from a file or an HTTP(S) URL and never parsed: a document that fails to
//! load is skipped, and the UI reports the failure when it asks for it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::body::Bytes;

use crate::ui_config::DocUrl;

pub const DEFAULT_GROUP: &str = "default";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_YAML: &str = "application/yaml";

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("unknown document group: {0}")]
    UnknownGroup(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch document: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("fetching {url} returned status {status}")]
    Status { url: String, status: u16 },
}

// =============================================================================
// DOCUMENTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub bytes: Bytes,
    pub content_type: &'static str,
}

impl Document {
    /// Wrap raw bytes, picking the content type from `name` or the content.
    #[must_use]
    pub fn new(name: &str, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let content_type = content_type_for(name, &bytes);
        Self { bytes, content_type }
    }
}

/// Where a group's document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocSource {
    File(PathBuf),
    Remote(String),
}

impl DocSource {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Remote(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

impl std::fmt::Display for DocSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

/// Content type by extension, falling back to sniffing: JSON documents start
/// with `{`, anything else is served as YAML.
#[must_use]
pub fn content_type_for(name: &str, bytes: &[u8]) -> &'static str {
    let name = name.split(['?', '#']).next().unwrap_or(name);
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("json") => CONTENT_TYPE_JSON,
        Some("yaml" | "yml") => CONTENT_TYPE_YAML,
        _ => match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => CONTENT_TYPE_JSON,
            _ => CONTENT_TYPE_YAML,
        },
    }
}

/// Load one document.
///
/// # Errors
///
/// Returns `Read` for file errors, `Fetch`/`Status` for HTTP failures.
pub async fn load_source(source: &DocSource, timeout: Duration) -> Result<Document, DocError> {
    match source {
        DocSource::File(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| DocError::Read { path: path.clone(), source })?;
            Ok(Document::new(&path.to_string_lossy(), bytes))
        }
        DocSource::Remote(url) => {
            let client = reqwest::Client::builder().timeout(timeout).build()?;
            let resp = client.get(url).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(DocError::Status { url: url.clone(), status: status.as_u16() });
            }
            let bytes = resp.bytes().await?;
            Ok(Document::new(url, bytes))
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Documents by group, in registration order.
#[derive(Debug, Clone)]
pub struct DocStore {
    openapi_path: String,
    group_query_name: String,
    docs: HashMap<String, Document>,
    order: Vec<String>,
}

impl DocStore {
    #[must_use]
    pub fn new(openapi_path: impl Into<String>, group_query_name: impl Into<String>) -> Self {
        Self {
            openapi_path: openapi_path.into(),
            group_query_name: group_query_name.into(),
            docs: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register `doc` under `group`, replacing any previous document. Returns
    /// the selector entry pointing at it.
    pub fn insert(&mut self, group: impl Into<String>, doc: Document) -> DocUrl {
        let group = group.into();
        if self.docs.insert(group.clone(), doc).is_none() {
            self.order.push(group.clone());
        }
        self.url_for(&group)
    }

    /// Look up a group, `default` when none is named.
    ///
    /// # Errors
    ///
    /// Returns `UnknownGroup` if nothing is registered under the name.
    pub fn get(&self, group: Option<&str>) -> Result<&Document, DocError> {
        let group = group.unwrap_or(DEFAULT_GROUP);
        self.docs
            .get(group)
            .ok_or_else(|| DocError::UnknownGroup(group.to_string()))
    }

    #[must_use]
    pub fn url_for(&self, group: &str) -> DocUrl {
        DocUrl {
            url: format!("{}?{}={group}", self.openapi_path, self.group_query_name),
            name: group.to_string(),
        }
    }

    /// Registered group names, in registration order.
    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.order
    }

    #[must_use]
    pub fn urls(&self) -> Vec<DocUrl> {
        self.order.iter().map(|group| self.url_for(group)).collect()
    }

    #[must_use]
    pub fn group_query_name(&self) -> &str {
        &self.group_query_name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Load every source into a store. Failed loads are logged and skipped.
pub async fn load_store(
    sources: &[(String, DocSource)],
    openapi_path: &str,
    group_query_name: &str,
    timeout: Duration,
) -> DocStore {
    let mut store = DocStore::new(openapi_path, group_query_name);
    for (group, source) in sources {
        match load_source(source, timeout).await {
            Ok(doc) => {
                tracing::info!(%group, %source, content_type = doc.content_type, bytes = doc.bytes.len(), "document loaded");
                store.insert(group.clone(), doc);
            }
            Err(e) => {
                tracing::warn!(%group, %source, error = %e, "document not loaded");
            }
        }
    }
    store
}

#[cfg(test)]
#[path = "docs_test.rs"]
mod tests;
