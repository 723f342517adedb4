//! Service configuration parsed from environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::docs::{DEFAULT_GROUP, DocSource, DocStore};
use crate::initializer::{DEFAULT_ASSET_BASE_URL, INITIALIZER_PATH, UiKind};
use crate::routes::{CONFIG_PATH, HEALTHZ_PATH, LICENSE_PATH};
use crate::ui_config::UiConfiguration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DOCS_PATH: &str = "/docs";
pub const DEFAULT_OPENAPI_PATH: &str = "/openapi.json";
pub const DEFAULT_GROUP_QUERY_NAME: &str = "urls.primaryName";
pub const DEFAULT_SOURCES: &str = "default=openapi.yaml";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LICENSE_FILE: &str = "LICENSE";

/// Routes registered regardless of configuration.
const FIXED_ROUTES: [&str; 4] = [INITIALIZER_PATH, CONFIG_PATH, LICENSE_PATH, HEALTHZ_PATH];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("unknown DOCS_UI_TYPE: {0}")]
    UnknownUiType(String),
    #[error("invalid DOCS_SOURCES entry '{0}' (expected group=path-or-url)")]
    InvalidSource(String),
    #[error("invalid document group name '{0}'")]
    InvalidGroup(String),
    #[error("duplicate document group '{0}'")]
    DuplicateGroup(String),
    #[error("route conflict: {0}")]
    RouteConflict(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    pub port: u16,
    pub prod: bool,
    pub ui_kind: UiKind,
    pub docs_path: String,
    pub openapi_path: String,
    pub group_query_name: String,
    /// Overrides the document URL handed to the UI (deployment rewrite).
    pub document_url: Option<String>,
    pub sources: Vec<(String, DocSource)>,
    pub license_file: Option<PathBuf>,
    pub asset_base_url: String,
    pub fetch_timeout: Duration,
}

impl DocsConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DOCS_PROD`: production mode, disables the `/` redirect
    /// - `DOCS_UI_TYPE`: `swagger` (default), `rapi` or `openapi-ui`
    /// - `DOCS_PATH`: default `/docs`
    /// - `DOCS_OPENAPI_PATH`: default `/openapi.json`
    /// - `DOCS_GROUP_QUERY_NAME`: default `urls.primaryName`
    /// - `DOCS_DOCUMENT_URL`: default is the document route itself
    /// - `DOCS_SOURCES`: comma list of `group=path-or-url`, default `default=openapi.yaml`
    /// - `DOCS_LICENSE_FILE`: served at `/docs/LICENSE`; defaults to `./LICENSE` when it exists
    /// - `DOCS_ASSET_BASE_URL`: default unpkg `swagger-ui-dist`
    /// - `DOCS_FETCH_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error for an unparsable port, an unknown UI type, a
    /// malformed source list, or docs/document paths that collide with each
    /// other or a fixed route.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let ui_kind = match std::env::var("DOCS_UI_TYPE") {
            Ok(raw) => raw.parse::<UiKind>().map_err(|e| ConfigError::UnknownUiType(e.0))?,
            Err(_) => UiKind::default(),
        };

        let sources = parse_sources(&env_or("DOCS_SOURCES", DEFAULT_SOURCES))?;

        let docs_path = normalize_route(&env_or("DOCS_PATH", DEFAULT_DOCS_PATH));
        let openapi_path = normalize_route(&env_or("DOCS_OPENAPI_PATH", DEFAULT_OPENAPI_PATH));
        check_routes(&docs_path, &openapi_path)?;

        Ok(Self {
            port,
            prod: env_bool("DOCS_PROD").unwrap_or(false),
            ui_kind,
            docs_path,
            openapi_path,
            group_query_name: env_or("DOCS_GROUP_QUERY_NAME", DEFAULT_GROUP_QUERY_NAME),
            document_url: env_non_empty("DOCS_DOCUMENT_URL"),
            sources,
            license_file: env_non_empty("DOCS_LICENSE_FILE")
                .map(PathBuf::from)
                .or_else(|| existing_file(Path::new(DEFAULT_LICENSE_FILE))),
            asset_base_url: env_or("DOCS_ASSET_BASE_URL", DEFAULT_ASSET_BASE_URL),
            fetch_timeout: Duration::from_secs(env_parse("DOCS_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)),
        })
    }

    /// Primary group for the selector: `default` when configured.
    #[must_use]
    pub fn primary_group(&self) -> Option<String> {
        self.sources
            .iter()
            .any(|(group, _)| group == DEFAULT_GROUP)
            .then(|| DEFAULT_GROUP.to_string())
    }

    /// UI configuration for the documents that actually loaded.
    ///
    /// The bare document route serves `default`, so when a single other group
    /// is left the UI is pointed at that group explicitly.
    #[must_use]
    pub fn ui_configuration(&self, store: &DocStore) -> UiConfiguration {
        let document_url = match (&self.document_url, store.groups()) {
            (Some(url), _) => url.clone(),
            (None, [only]) if only != DEFAULT_GROUP => store.url_for(only).url,
            _ => self.openapi_path.clone(),
        };
        let primary = self.primary_group().filter(|group| store.get(Some(group.as_str())).is_ok());

        UiConfiguration::swagger_defaults(document_url).with_groups(store.urls(), primary)
    }
}

/// Reject docs/document paths that axum would refuse to register together.
pub(crate) fn check_routes(docs_path: &str, openapi_path: &str) -> Result<(), ConfigError> {
    if docs_path == openapi_path {
        return Err(ConfigError::RouteConflict(format!(
            "DOCS_PATH and DOCS_OPENAPI_PATH are both {docs_path}"
        )));
    }
    for (var, path) in [("DOCS_PATH", docs_path), ("DOCS_OPENAPI_PATH", openapi_path)] {
        if FIXED_ROUTES.contains(&path) {
            return Err(ConfigError::RouteConflict(format!("{var}={path} is a reserved route")));
        }
    }
    // `/` carries the docs redirect unless the docs page lives there.
    if openapi_path == "/" {
        return Err(ConfigError::RouteConflict("DOCS_OPENAPI_PATH=/ is a reserved route".into()));
    }
    Ok(())
}

fn existing_file(path: &Path) -> Option<PathBuf> {
    path.is_file().then(|| path.to_path_buf())
}

/// Parse `group=path-or-url` entries. A bare entry without `=` names the
/// `default` group.
pub(crate) fn parse_sources(raw: &str) -> Result<Vec<(String, DocSource)>, ConfigError> {
    let mut sources: Vec<(String, DocSource)> = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (group, location) = match entry.split_once('=') {
            Some((group, location)) => (group.trim(), location.trim()),
            None => (DEFAULT_GROUP, entry),
        };
        if location.is_empty() {
            return Err(ConfigError::InvalidSource(entry.to_string()));
        }
        if !valid_group_name(group) {
            return Err(ConfigError::InvalidGroup(group.to_string()));
        }
        if sources.iter().any(|(existing, _)| existing == group) {
            return Err(ConfigError::DuplicateGroup(group.to_string()));
        }
        sources.push((group.to_string(), DocSource::parse(location)));
    }
    Ok(sources)
}

/// Group names end up in query strings unescaped.
fn valid_group_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Leading slash, no trailing slash.
pub(crate) fn normalize_route(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    format!("/{trimmed}")
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_non_empty(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
