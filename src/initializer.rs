//! Browser-side rendering of the docs UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! The UI itself runs in the browser from CDN assets. This module produces the
//! two files that glue it to our configuration: the HTML shell served at the
//! docs path and `swagger-initializer.js`, which calls `SwaggerUIBundle` once
//! on page load and keeps the result in `window.ui`.
//!
//! DESIGN
//! ======
//! Data options are emitted as one JSON object, so string values are quoted by
//! `serde_json` rather than by hand. Presets and plugins are appended as bare
//! expressions. `<` is escaped inside JSON so nothing can close a `<script>`.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::bootstrap::UiFactory;
use crate::ui_config::UiConfiguration;

pub const DEFAULT_ASSET_BASE_URL: &str = "https://unpkg.com/swagger-ui-dist@5.18.2";
pub const INITIALIZER_PATH: &str = "/docs/swagger-initializer.js";
pub const RAPIDOC_SCRIPT_URL: &str = "https://unpkg.com/rapidoc/dist/rapidoc-min.js";
pub const OPENAPI_UI_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/@scalar/api-reference";

const PAGE_TITLE: &str = "API Documentation";

// =============================================================================
// UI KIND
// =============================================================================

/// Which browser UI renders the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiKind {
    #[default]
    Swagger,
    Rapi,
    OpenApiUi,
}

impl UiKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Swagger => "swagger",
            Self::Rapi => "rapi",
            Self::OpenApiUi => "openapi-ui",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ui type '{0}' (expected 'swagger', 'rapi' or 'openapi-ui')")]
pub struct UnknownUiKind(pub String);

impl FromStr for UiKind {
    type Err = UnknownUiKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "swagger" => Ok(Self::Swagger),
            "rapi" => Ok(Self::Rapi),
            "openapi-ui" => Ok(Self::OpenApiUi),
            other => Err(UnknownUiKind(other.to_string())),
        }
    }
}

/// Where the page loads its scripts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAssets {
    pub base_url: String,
    pub initializer_path: String,
}

impl Default for PageAssets {
    fn default() -> Self {
        Self { base_url: DEFAULT_ASSET_BASE_URL.into(), initializer_path: INITIALIZER_PATH.into() }
    }
}

// =============================================================================
// RENDERING
// =============================================================================

/// Render `swagger-initializer.js` for `config`.
///
/// The `load` listener runs once and skips the factory call when `window.ui`
/// is already set.
#[must_use]
pub fn render_initializer(config: &UiConfiguration) -> String {
    let options = options_literal(config);

    let mut out = String::new();
    out.push_str("// Generated by apidocs.\n");
    let _ = writeln!(out, "const apidocsOptions = {options};");
    out.push('\n');
    out.push_str("window.addEventListener(\"load\", function () {\n");
    out.push_str("  if (window.ui) {\n    return;\n  }\n");
    out.push_str("  window.ui = SwaggerUIBundle(Object.assign({}, apidocsOptions, {\n");
    let _ = writeln!(out, "    presets: [{}],", join_exprs(config.presets.iter().map(|p| p.js_expr())));
    let _ = writeln!(out, "    plugins: [{}]", join_exprs(config.plugins.iter().map(|p| p.js_expr())));
    out.push_str("  }));\n");
    out.push_str("}, { once: true });\n");
    out
}

/// Render the HTML shell for `kind`.
#[must_use]
pub fn render_page(kind: UiKind, config: &UiConfiguration, assets: &PageAssets) -> String {
    let base = assets.base_url.trim_end_matches('/');
    let document_url = escape_html(&config.document_url);

    let (head, body) = match kind {
        UiKind::Swagger => (
            format!(
                "  <link rel=\"stylesheet\" type=\"text/css\" href=\"{base}/swagger-ui.css\">\n",
                base = escape_html(base)
            ),
            format!(
                "  <div id=\"{mount}\"></div>\n  \
                 <script src=\"{base}/swagger-ui-bundle.js\" charset=\"UTF-8\"></script>\n  \
                 <script src=\"{base}/swagger-ui-standalone-preset.js\" charset=\"UTF-8\"></script>\n  \
                 <script src=\"{init}\" charset=\"UTF-8\"></script>\n",
                mount = escape_html(config.mount_element_id()),
                base = escape_html(base),
                init = escape_html(&assets.initializer_path),
            ),
        ),
        UiKind::Rapi => (
            format!("  <script type=\"module\" src=\"{RAPIDOC_SCRIPT_URL}\"></script>\n"),
            format!(
                "  <rapi-doc spec-url=\"{document_url}\" render-style=\"read\" allow-try=\"{try_it}\"></rapi-doc>\n",
                try_it = config.try_it_out_enabled,
            ),
        ),
        UiKind::OpenApiUi => (
            String::new(),
            format!(
                "  <script id=\"api-reference\" data-url=\"{document_url}\"></script>\n  \
                 <script src=\"{OPENAPI_UI_SCRIPT_URL}\"></script>\n"
            ),
        ),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"UTF-8\">\n  \
         <title>{PAGE_TITLE}</title>\n{head}</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

/// Script-safe JSON for `options`, `{}` (logged) if it cannot be serialized.
fn options_literal<T: serde::Serialize>(options: &T) -> String {
    match serde_json::to_string_pretty(options) {
        Ok(json) => script_safe(&json),
        Err(e) => {
            tracing::error!(error = %e, "ui config serialization failed");
            "{}".to_string()
        }
    }
}

fn join_exprs<'a>(exprs: impl Iterator<Item = &'a str>) -> String {
    exprs.collect::<Vec<_>>().join(", ")
}

/// Escape `<` so JSON can be inlined in a script without closing it.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// =============================================================================
// FACTORY
// =============================================================================

/// The live docs UI: everything the routes serve, rendered once.
#[derive(Debug, Clone)]
pub struct DocsUi {
    pub kind: UiKind,
    pub page: String,
    pub initializer: String,
    pub config_json: serde_json::Value,
}

/// Renders a `DocsUi` for one UI kind and asset location.
pub struct SwaggerUiFactory {
    pub kind: UiKind,
    pub assets: PageAssets,
}

impl UiFactory for SwaggerUiFactory {
    type Handle = DocsUi;

    fn create(&self, config: UiConfiguration) -> DocsUi {
        let config_json = serde_json::to_value(&config).unwrap_or_else(|e| {
            tracing::error!(error = %e, "ui config serialization failed");
            serde_json::Value::Null
        });
        DocsUi {
            kind: self.kind,
            page: render_page(self.kind, &config, &self.assets),
            initializer: render_initializer(&config),
            config_json,
        }
    }
}

#[cfg(test)]
#[path = "initializer_test.rs"]
mod tests;
