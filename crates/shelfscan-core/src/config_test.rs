use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SHELFSCAN_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:5000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.fetcher, FetcherKind::Http);
    assert!(cfg.headless);
    assert_eq!(cfg.page_load_timeout_secs, 30);
    assert_eq!(cfg.description_max_chars, 500);
    assert_eq!(cfg.sheet_name, "Compras");
    assert!(cfg.spreadsheet_id.is_none());
    assert!(cfg.sheets_access_token.is_none());
    assert_eq!(cfg.sheets_api_base, "https://sheets.googleapis.com");
    assert_eq!(cfg.write_mode, WriteModeKind::Append);
    assert_eq!(cfg.header_row, 5);
    assert_eq!(cfg.row_schema, RowSchemaKind::Detailed);
}

#[test]
fn build_app_config_reads_sheet_settings() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_SHEET_ID", "sheet-123");
    map.insert("SHEET_NAME", "Purchases");
    map.insert("GOOGLE_SHEETS_ACCESS_TOKEN", "ya29.token");
    map.insert("SHELFSCAN_SHEETS_API_BASE", "http://127.0.0.1:9999/");
    map.insert("SHELFSCAN_WRITE_MODE", "fixed-header");
    map.insert("SHELFSCAN_HEADER_ROW", "2");
    map.insert("SHELFSCAN_ROW_SCHEMA", "basic");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.spreadsheet_id.as_deref(), Some("sheet-123"));
    assert_eq!(cfg.sheet_name, "Purchases");
    assert_eq!(cfg.sheets_access_token.as_deref(), Some("ya29.token"));
    assert_eq!(cfg.sheets_api_base, "http://127.0.0.1:9999");
    assert_eq!(cfg.write_mode, WriteModeKind::FixedHeader);
    assert_eq!(cfg.header_row, 2);
    assert_eq!(cfg.row_schema, RowSchemaKind::Basic);
}

#[test]
fn blank_optional_values_are_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_SHEET_ID", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.spreadsheet_id.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFSCAN_BIND_ADDR"),
        "expected InvalidEnvVar(SHELFSCAN_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_unknown_fetcher() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_FETCHER", "selenium");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFSCAN_FETCHER"),
        "expected InvalidEnvVar(SHELFSCAN_FETCHER), got: {result:?}"
    );
}

#[test]
fn browser_fetcher_and_headless_flag_parse() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_FETCHER", "Browser");
    map.insert("SHELFSCAN_HEADLESS", "False");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.fetcher, FetcherKind::Browser);
    assert!(!cfg.headless);
}

#[test]
fn invalid_headless_flag_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_HEADLESS", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFSCAN_HEADLESS"),
        "expected InvalidEnvVar(SHELFSCAN_HEADLESS), got: {result:?}"
    );
}

#[test]
fn page_load_timeout_override_and_invalid() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_PAGE_LOAD_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.page_load_timeout_secs, 60);

    map.insert("SHELFSCAN_PAGE_LOAD_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFSCAN_PAGE_LOAD_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SHELFSCAN_PAGE_LOAD_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn zero_description_cap_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_DESCRIPTION_MAX_CHARS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFSCAN_DESCRIPTION_MAX_CHARS"),
        "expected InvalidEnvVar(SHELFSCAN_DESCRIPTION_MAX_CHARS), got: {result:?}"
    );
}

#[test]
fn unknown_write_mode_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_WRITE_MODE", "upsert");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFSCAN_WRITE_MODE"),
        "expected InvalidEnvVar(SHELFSCAN_WRITE_MODE), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_access_token() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_SHEETS_ACCESS_TOKEN", "ya29.secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("ya29.secret-token"));
    assert!(rendered.contains("[redacted]"));
}
