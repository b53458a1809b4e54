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
fn build_app_config_applies_defaults_on_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.api_base_url, "http://localhost:5000/api");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.http_timeout_secs.is_none());
    assert_eq!(cfg.http_connect_timeout_secs, 10);
    assert_eq!(cfg.user_agent, "agency-browser/0.1");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("AGENCY_API_BASE_URL", "https://agencies.example.test/api/");
    map.insert("AGENCY_LOG_LEVEL", "debug");
    map.insert("AGENCY_HTTP_TIMEOUT_SECS", "15");
    map.insert("AGENCY_HTTP_CONNECT_TIMEOUT_SECS", "3");
    map.insert("AGENCY_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://agencies.example.test/api/");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.http_timeout_secs, Some(15));
    assert_eq!(cfg.http_connect_timeout_secs, 3);
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("AGENCY_HTTP_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AGENCY_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(AGENCY_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_connect_timeout() {
    let mut map = HashMap::new();
    map.insert("AGENCY_HTTP_CONNECT_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AGENCY_HTTP_CONNECT_TIMEOUT_SECS"),
        "expected InvalidEnvVar(AGENCY_HTTP_CONNECT_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("AGENCY_API_BASE_URL", "localhost:5000/api");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AGENCY_API_BASE_URL"),
        "expected InvalidEnvVar(AGENCY_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn debug_output_lists_fields() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(rendered.contains("api_base_url"));
    assert!(rendered.contains("localhost:5000"));
}
