use super::*;
use crate::docs::Document;

const DOCS_ENV: [&str; 11] = [
    "PORT",
    "DOCS_PROD",
    "DOCS_UI_TYPE",
    "DOCS_PATH",
    "DOCS_OPENAPI_PATH",
    "DOCS_GROUP_QUERY_NAME",
    "DOCS_DOCUMENT_URL",
    "DOCS_SOURCES",
    "DOCS_LICENSE_FILE",
    "DOCS_ASSET_BASE_URL",
    "DOCS_FETCH_TIMEOUT_SECS",
];

/// # Safety
/// Only the `from_env_*` test below touches these variables.
unsafe fn clear_docs_env() {
    for key in DOCS_ENV {
        unsafe { std::env::remove_var(key) };
    }
}

// =============================================================================
// from_env: a single test so the shared variables are never raced.
// =============================================================================

#[test]
fn from_env_defaults_overrides_and_errors() {
    unsafe { clear_docs_env() };

    let cfg = DocsConfig::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert!(!cfg.prod);
    assert_eq!(cfg.ui_kind, UiKind::Swagger);
    assert_eq!(cfg.docs_path, "/docs");
    assert_eq!(cfg.openapi_path, "/openapi.json");
    assert_eq!(cfg.group_query_name, "urls.primaryName");
    assert_eq!(cfg.document_url, None);
    assert_eq!(cfg.sources, vec![("default".to_string(), DocSource::File(PathBuf::from("openapi.yaml")))]);
    assert_eq!(cfg.primary_group().as_deref(), Some("default"));
    assert_eq!(cfg.license_file, None);
    assert_eq!(cfg.asset_base_url, DEFAULT_ASSET_BASE_URL);
    assert_eq!(cfg.fetch_timeout, Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS));

    unsafe {
        std::env::set_var("PORT", "8080");
        std::env::set_var("DOCS_PROD", "yes");
        std::env::set_var("DOCS_UI_TYPE", "rapi");
        std::env::set_var("DOCS_PATH", "api-docs/");
        std::env::set_var("DOCS_OPENAPI_PATH", "/spec");
        std::env::set_var("DOCS_GROUP_QUERY_NAME", "group");
        std::env::set_var("DOCS_DOCUMENT_URL", "openapi.yaml");
        std::env::set_var("DOCS_SOURCES", "public=specs/public.yaml, admin=https://internal.test/admin.json");
        std::env::set_var("DOCS_LICENSE_FILE", "LICENSE");
        std::env::set_var("DOCS_FETCH_TIMEOUT_SECS", "3");
    }

    let cfg = DocsConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert!(cfg.prod);
    assert_eq!(cfg.ui_kind, UiKind::Rapi);
    assert_eq!(cfg.docs_path, "/api-docs");
    assert_eq!(cfg.openapi_path, "/spec");
    assert_eq!(cfg.group_query_name, "group");
    assert_eq!(cfg.document_url.as_deref(), Some("openapi.yaml"));
    assert_eq!(cfg.sources.len(), 2);
    assert_eq!(cfg.sources[1].1, DocSource::Remote("https://internal.test/admin.json".into()));
    assert_eq!(cfg.primary_group(), None);
    assert_eq!(cfg.license_file, Some(PathBuf::from("LICENSE")));
    assert_eq!(cfg.fetch_timeout, Duration::from_secs(3));

    unsafe { std::env::set_var("DOCS_UI_TYPE", "redoc") };
    assert_eq!(DocsConfig::from_env().unwrap_err(), ConfigError::UnknownUiType("redoc".into()));

    unsafe {
        std::env::set_var("DOCS_UI_TYPE", "swagger");
        std::env::set_var("PORT", "not-a-port");
    }
    assert_eq!(DocsConfig::from_env().unwrap_err(), ConfigError::InvalidPort("not-a-port".into()));

    unsafe {
        std::env::set_var("PORT", "8080");
        std::env::set_var("DOCS_PATH", "/healthz");
    }
    assert!(matches!(DocsConfig::from_env().unwrap_err(), ConfigError::RouteConflict(_)));

    unsafe {
        std::env::set_var("DOCS_PATH", "/spec/");
    }
    assert!(matches!(DocsConfig::from_env().unwrap_err(), ConfigError::RouteConflict(_)));

    unsafe { clear_docs_env() };
}

// =============================================================================
// parse_sources
// =============================================================================

#[test]
fn parse_sources_bare_entry_is_default_group() {
    let sources = parse_sources("openapi.json").unwrap();
    assert_eq!(sources, vec![("default".to_string(), DocSource::File(PathBuf::from("openapi.json")))]);
}

#[test]
fn parse_sources_skips_empty_entries() {
    let sources = parse_sources(" a=a.yaml ,, b=b.yaml ,").unwrap();
    let groups: Vec<_> = sources.iter().map(|(g, _)| g.as_str()).collect();
    assert_eq!(groups, vec!["a", "b"]);
}

#[test]
fn parse_sources_rejects_missing_location() {
    assert_eq!(parse_sources("admin=").unwrap_err(), ConfigError::InvalidSource("admin=".into()));
}

#[test]
fn parse_sources_rejects_bad_group_names() {
    assert_eq!(parse_sources("=x.yaml").unwrap_err(), ConfigError::InvalidGroup(String::new()));
    assert_eq!(parse_sources("a b=x.yaml").unwrap_err(), ConfigError::InvalidGroup("a b".into()));
    assert_eq!(parse_sources("a&b=x.yaml").unwrap_err(), ConfigError::InvalidGroup("a&b".into()));
}

#[test]
fn parse_sources_rejects_duplicates() {
    assert_eq!(parse_sources("a=1.yaml,a=2.yaml").unwrap_err(), ConfigError::DuplicateGroup("a".into()));
}

#[test]
fn parse_sources_url_with_query_keeps_equals() {
    let sources = parse_sources("v2=https://host.test/spec?format=json").unwrap();
    assert_eq!(sources[0].1, DocSource::Remote("https://host.test/spec?format=json".into()));
}

// =============================================================================
// check_routes
// =============================================================================

#[test]
fn check_routes_accepts_defaults_and_root_docs() {
    assert_eq!(check_routes(DEFAULT_DOCS_PATH, DEFAULT_OPENAPI_PATH), Ok(()));
    assert_eq!(check_routes("/", "/openapi.json"), Ok(()));
}

#[test]
fn check_routes_rejects_shared_path() {
    let err = check_routes("/docs", "/docs").unwrap_err();
    assert_eq!(err, ConfigError::RouteConflict("DOCS_PATH and DOCS_OPENAPI_PATH are both /docs".into()));
}

#[test]
fn check_routes_rejects_fixed_routes() {
    assert_eq!(
        check_routes("/healthz", "/openapi.json").unwrap_err(),
        ConfigError::RouteConflict("DOCS_PATH=/healthz is a reserved route".into())
    );
    for fixed in FIXED_ROUTES {
        assert!(check_routes("/docs", fixed).is_err(), "{fixed} should be reserved");
    }
    assert!(check_routes("/docs", "/").is_err());
}

// =============================================================================
// ui_configuration
// =============================================================================

fn config_with_sources(raw: &str) -> DocsConfig {
    DocsConfig {
        port: DEFAULT_PORT,
        prod: false,
        ui_kind: UiKind::Swagger,
        docs_path: DEFAULT_DOCS_PATH.into(),
        openapi_path: DEFAULT_OPENAPI_PATH.into(),
        group_query_name: DEFAULT_GROUP_QUERY_NAME.into(),
        document_url: None,
        sources: parse_sources(raw).unwrap(),
        license_file: None,
        asset_base_url: DEFAULT_ASSET_BASE_URL.into(),
        fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
    }
}

fn store_with(groups: &[&str]) -> DocStore {
    let mut store = DocStore::new(DEFAULT_OPENAPI_PATH, DEFAULT_GROUP_QUERY_NAME);
    for group in groups {
        store.insert(*group, Document::new("openapi.yaml", "openapi: 3.0.3\n"));
    }
    store
}

#[test]
fn ui_configuration_default_group_uses_bare_route() {
    let cfg = config_with_sources(DEFAULT_SOURCES);
    let ui = cfg.ui_configuration(&store_with(&["default"]));

    assert_eq!(ui.document_url, "/openapi.json");
    assert!(ui.urls.is_empty());
}

#[test]
fn ui_configuration_single_named_group_is_addressed_explicitly() {
    let cfg = config_with_sources("api=api.yaml");
    let ui = cfg.ui_configuration(&store_with(&["api"]));

    assert_eq!(ui.document_url, "/openapi.json?urls.primaryName=api");
    assert_eq!(ui.primary_name, None);
}

#[test]
fn ui_configuration_survivor_of_failed_default_is_addressed_explicitly() {
    let cfg = config_with_sources("default=missing.yaml,admin=admin.json");
    let ui = cfg.ui_configuration(&store_with(&["admin"]));

    assert_eq!(ui.document_url, "/openapi.json?urls.primaryName=admin");
    assert_eq!(ui.primary_name, None);
}

#[test]
fn ui_configuration_lists_groups_and_primary() {
    let cfg = config_with_sources("default=openapi.yaml,admin=admin.json");
    let ui = cfg.ui_configuration(&store_with(&["default", "admin"]));

    assert_eq!(ui.document_url, "/openapi.json");
    assert_eq!(ui.urls.len(), 2);
    assert_eq!(ui.primary_name.as_deref(), Some("default"));
}

#[test]
fn ui_configuration_override_wins() {
    let mut cfg = config_with_sources("api=api.yaml");
    cfg.document_url = Some("/gateway/openapi.yaml".into());
    let ui = cfg.ui_configuration(&store_with(&["api"]));

    assert_eq!(ui.document_url, "/gateway/openapi.yaml");
}

// =============================================================================
// helpers
// =============================================================================

#[test]
fn existing_file_only_for_regular_files() {
    let dir = std::env::temp_dir().join(format!("apidocs-license-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let license = dir.join("LICENSE");
    std::fs::write(&license, "MIT").unwrap();

    assert_eq!(existing_file(&license), Some(license.clone()));
    assert_eq!(existing_file(&dir), None);
    assert_eq!(existing_file(&dir.join("missing")), None);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn normalize_route_adds_and_strips_slashes() {
    assert_eq!(normalize_route("docs"), "/docs");
    assert_eq!(normalize_route("/docs/"), "/docs");
    assert_eq!(normalize_route("/"), "/");
}

#[test]
fn env_bool_variants() {
    for (i, (val, expected)) in [("1", Some(true)), ("ON", Some(true)), ("no", Some(false)), ("maybe", None)]
        .iter()
        .enumerate()
    {
        let key = format!("__TEST_APIDOCS_EB_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), *expected, "unexpected result for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
    assert_eq!(env_bool("__TEST_APIDOCS_EB_UNSET__"), None);
}
