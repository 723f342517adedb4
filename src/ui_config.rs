//! Swagger UI configuration record.
//!
//! DESIGN
//! ======
//! `UiConfiguration` mirrors the options object handed to `SwaggerUIBundle`.
//! It is built once at startup, consumed by a `UiFactory`, and never kept by
//! the bootstrapper. Presets and plugins are code references in the browser,
//! so they render to fixed JavaScript expressions and are left out of the
//! JSON form served at `/docs/config`.

use serde::{Serialize, Serializer};

pub const DEFAULT_DOCUMENT_URL: &str = "openapi.yaml";
pub const DEFAULT_MOUNT_POINT: &str = "#swagger-ui";
pub const DEFAULT_LAYOUT: &str = "StandaloneLayout";
pub const DEFAULT_SYNTAX_THEME: &str = "monokai";
pub const VALIDATOR_DISABLED: &str = "none";

// =============================================================================
// OPTION TYPES
// =============================================================================

/// Initial expansion of operations and tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocExpansion {
    #[default]
    None,
    List,
    Full,
}

/// Presets bundled with Swagger UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// The API explorer preset.
    Apis,
    /// The standalone layout preset (top bar, group selector).
    Standalone,
}

impl Preset {
    /// JavaScript expression resolving to the preset in the browser.
    #[must_use]
    pub fn js_expr(self) -> &'static str {
        match self {
            Self::Apis => "SwaggerUIBundle.presets.apis",
            Self::Standalone => "SwaggerUIStandalonePreset",
        }
    }
}

/// Plugins bundled with Swagger UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plugin {
    /// Lets the top bar load a document from an arbitrary URL.
    DownloadUrl,
}

impl Plugin {
    #[must_use]
    pub fn js_expr(self) -> &'static str {
        match self {
            Self::DownloadUrl => "SwaggerUIBundle.plugins.DownloadUrl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxHighlight {
    pub activated: bool,
    pub theme: String,
}

impl Default for SyntaxHighlight {
    fn default() -> Self {
        Self { activated: true, theme: DEFAULT_SYNTAX_THEME.into() }
    }
}

/// Remote schema validator. Serializes as `"none"` when disabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidatorUrl {
    #[default]
    Disabled,
    Remote(String),
}

impl ValidatorUrl {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Disabled => VALIDATOR_DISABLED,
            Self::Remote(url) => url,
        }
    }
}

impl Serialize for ValidatorUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// HTTP methods the "Try it out" panel may submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl SubmitMethod {
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Options,
        Self::Head,
        Self::Patch,
        Self::Trace,
    ];
}

/// One entry of the group selector shown by the standalone layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocUrl {
    pub url: String,
    pub name: String,
}

// =============================================================================
// CONFIGURATION RECORD
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfiguration {
    /// Location of the OpenAPI document, usually relative to the UI page.
    #[serde(rename = "url")]
    pub document_url: String,
    /// CSS selector of the element the UI mounts into.
    #[serde(rename = "dom_id")]
    pub mount_point: String,
    pub deep_linking: bool,
    pub doc_expansion: DocExpansion,
    #[serde(skip)]
    pub presets: Vec<Preset>,
    #[serde(skip)]
    pub plugins: Vec<Plugin>,
    pub layout: String,
    pub syntax_highlight: SyntaxHighlight,
    pub validator_url: ValidatorUrl,
    pub try_it_out_enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<DocUrl>,
    #[serde(rename = "urls.primaryName", skip_serializing_if = "Option::is_none")]
    pub primary_name: Option<String>,
    pub query_config_enabled: bool,
    pub display_request_duration: bool,
    pub supported_submit_methods: Vec<SubmitMethod>,
}

impl UiConfiguration {
    /// The standalone explorer setup pointing at `document_url`.
    #[must_use]
    pub fn swagger_defaults(document_url: impl Into<String>) -> Self {
        Self {
            document_url: document_url.into(),
            mount_point: DEFAULT_MOUNT_POINT.into(),
            deep_linking: true,
            doc_expansion: DocExpansion::None,
            presets: vec![Preset::Apis, Preset::Standalone],
            plugins: vec![Plugin::DownloadUrl],
            layout: DEFAULT_LAYOUT.into(),
            syntax_highlight: SyntaxHighlight::default(),
            validator_url: ValidatorUrl::Disabled,
            try_it_out_enabled: true,
            urls: Vec::new(),
            primary_name: None,
            query_config_enabled: false,
            display_request_duration: false,
            supported_submit_methods: SubmitMethod::ALL.to_vec(),
        }
    }

    #[must_use]
    pub fn with_document_url(mut self, document_url: impl Into<String>) -> Self {
        self.document_url = document_url.into();
        self
    }

    /// Switch to the multi-document selector. A single group keeps the plain
    /// `url` form since the selector adds nothing.
    #[must_use]
    pub fn with_groups(mut self, urls: Vec<DocUrl>, primary_name: Option<String>) -> Self {
        if urls.len() > 1 {
            self.primary_name = primary_name.filter(|name| urls.iter().any(|u| &u.name == name));
            self.urls = urls;
        }
        self
    }

    /// The id of the mount element, without the selector prefix.
    #[must_use]
    pub fn mount_element_id(&self) -> &str {
        self.mount_point.strip_prefix('#').unwrap_or(&self.mount_point)
    }
}

impl Default for UiConfiguration {
    fn default() -> Self {
        Self::swagger_defaults(DEFAULT_DOCUMENT_URL)
    }
}

#[cfg(test)]
#[path = "ui_config_test.rs"]
mod tests;
