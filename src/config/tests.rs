//! Tests for config functionality.

use super::*;
use crate::pipeline::{ArtifactKind, Stage};
use crate::prompt::defaults;
use serial_test::serial;
use std::collections::HashMap;
use tempfile::TempDir;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn full_env() -> Vec<(&'static str, &'static str)> {
    vec![
        (API_KEY_ENV, "api-key-123"),
        (BASE_URL_ENV, "https://auth.example.com/"),
        (SUPERVISOR_ENV, "6f0b1c6e-0000-4000-8000-000000000001"),
    ]
}

#[test]
fn test_default_pipeline_config() {
    let config = PipelineConfig::default();

    assert_eq!(config.region, "us-west-2");
    assert!(config.runtime_base_url.is_none());
    assert_eq!(config.event_log.as_deref(), Some(".quill/events.ndjson"));
    assert_eq!(config.artifacts.get(ArtifactKind::Outline), "outline.md");
    assert_eq!(config.artifacts.get(ArtifactKind::Polished), "polished.md");

    let validate = config.stage(Stage::Validate);
    assert_eq!(validate.role, "validatecontent");
    assert_eq!(validate.endpoint, None);
    assert_eq!(validate.prompt, defaults::VALIDATE_CHECK_PROMPT);
    assert_eq!(validate.rewrite_prompt, defaults::VALIDATE_REWRITE_PROMPT);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_minimal_yaml() {
    let config = PipelineConfig::from_yaml("").unwrap();
    assert_eq!(config.region, "us-west-2");
    assert_eq!(config.stage(Stage::Draft).prompt, defaults::DRAFT_PROMPT);
}

#[test]
fn test_parse_partial_stage_override_keeps_defaults() {
    let yaml = r#"
draft:
  endpoint: "arn:aws:bedrock-agentcore:us-west-2:123456789012:runtime/draftagent-abc"
"#;
    let config = PipelineConfig::from_yaml(yaml).unwrap();
    let draft = config.stage(Stage::Draft);

    assert_eq!(
        draft.endpoint,
        Some("arn:aws:bedrock-agentcore:us-west-2:123456789012:runtime/draftagent-abc")
    );
    assert_eq!(draft.role, "draftcontent");
    assert_eq!(draft.prompt, defaults::DRAFT_PROMPT);
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
region: eu-central-1
runtime_base_url: "http://127.0.0.1:9000/"
event_log: null
artifacts:
  outline: in/outline.txt
  drafted: out/draft.txt
  validated: out/checked.txt
  polished: out/final.txt
draft:
  role: drafter
  prompt: "Write it:\n{content}"
validate:
  role: checker
  endpoint: validate-endpoint
  prompt: "Check: {content}"
  rewrite_prompt: "Fix: {content}"
polish:
  role: polisher
  prompt: "Polish: {content}"
"#;
    let config = PipelineConfig::from_yaml(yaml).unwrap();

    assert_eq!(config.region, "eu-central-1");
    assert_eq!(
        config.runtime_base_url.as_deref(),
        Some("http://127.0.0.1:9000/")
    );
    assert!(config.event_log.is_none());
    assert_eq!(config.artifacts.get(ArtifactKind::Drafted), "out/draft.txt");

    let validate = config.stage(Stage::Validate);
    assert_eq!(validate.role, "checker");
    assert_eq!(validate.endpoint, Some("validate-endpoint"));
    assert_eq!(validate.prompt, "Check: {content}");
    assert_eq!(validate.rewrite_prompt, "Fix: {content}");
    assert_eq!(config.stage(Stage::Polish).role, "polisher");
}

#[test]
fn test_unknown_fields_ignored() {
    let yaml = r#"
region: us-east-1
future_option: true
draft:
  temperature: 0.3
"#;
    let config = PipelineConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.region, "us-east-1");
}

#[test]
fn test_blank_endpoint_treated_as_unset() {
    let config = PipelineConfig::from_yaml("polish:\n  endpoint: \"  \"").unwrap();
    assert_eq!(config.stage(Stage::Polish).endpoint, None);
}

#[test]
fn test_validation_rejects_unknown_template_variable() {
    let yaml = "polish:\n  prompt: \"Polish {content} for {audience}\"";
    let err = PipelineConfig::from_yaml(yaml).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("polish.prompt"), "{}", msg);
    assert!(msg.contains("audience"), "{}", msg);
}

#[test]
fn test_validation_rejects_malformed_rewrite_prompt() {
    let yaml = "validate:\n  rewrite_prompt: \"Fix {content\"";
    let err = PipelineConfig::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("validate.rewrite_prompt"));
}

#[test]
fn test_validation_rejects_empty_region() {
    let err = PipelineConfig::from_yaml("region: \"\"").unwrap_err();
    assert!(err.to_string().contains("region must not be empty"));
}

#[test]
fn test_validation_rejects_non_http_runtime_base() {
    let err = PipelineConfig::from_yaml("runtime_base_url: ftp://example.com").unwrap_err();
    assert!(err.to_string().contains("runtime_base_url"));
}

#[test]
fn test_validation_rejects_empty_role_and_artifact() {
    assert!(PipelineConfig::from_yaml("draft:\n  role: \"\"").is_err());
    assert!(PipelineConfig::from_yaml("artifacts:\n  drafted: \"\"").is_err());
}

#[test]
fn test_invalid_yaml_is_config_error() {
    let err = PipelineConfig::from_yaml("region: [unclosed").unwrap_err();
    assert!(matches!(err, crate::error::QuillError::Config(_)));
}

#[test]
fn test_directory_settings_from_lookup() {
    let settings = DirectorySettings::from_lookup(lookup_from(&full_env())).unwrap();

    assert_eq!(settings.api_key, "api-key-123");
    assert_eq!(settings.base_url, "https://auth.example.com");
    assert_eq!(
        settings.supervisor_entity_id,
        "6f0b1c6e-0000-4000-8000-000000000001"
    );
}

#[test]
fn test_directory_settings_reports_all_missing() {
    let err = DirectorySettings::from_lookup(lookup_from(&[(API_KEY_ENV, "key")])).unwrap_err();
    let msg = err.to_string();

    assert!(msg.contains("missing: FUSIONAUTH_BASE_URL, SUPERVISOR_ENTITY_ID"), "{}", msg);
    assert_eq!(err.exit_code(), crate::exit_codes::CONFIG_ERROR);
}

#[test]
fn test_directory_settings_empty_value_is_missing() {
    let mut env = full_env();
    env[0] = (API_KEY_ENV, "   ");
    let err = DirectorySettings::from_lookup(lookup_from(&env)).unwrap_err();
    assert!(err.to_string().contains("missing: FUSIONAUTH_API_KEY"));
}

#[test]
fn test_directory_settings_debug_redacts_api_key() {
    let settings = DirectorySettings::from_lookup(lookup_from(&full_env())).unwrap();
    let debug = format!("{:?}", settings);
    assert!(!debug.contains("api-key-123"));
    assert!(debug.contains("<redacted>"));
}

fn set_full_env() {
    // SAFETY: tests touching the process environment are #[serial].
    unsafe {
        for (key, value) in full_env() {
            std::env::set_var(key, value);
        }
        std::env::remove_var(REGION_ENV);
    }
}

fn clear_env() {
    // SAFETY: tests touching the process environment are #[serial].
    unsafe {
        for key in [API_KEY_ENV, BASE_URL_ENV, SUPERVISOR_ENV, REGION_ENV] {
            std::env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn test_config_load_uses_default_file_in_work_dir() {
    set_full_env();
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(DEFAULT_CONFIG_FILE),
        "region: us-east-2\nartifacts:\n  outline: brief.md\n",
    )
    .unwrap();

    let config = Config::load(temp_dir.path(), None).unwrap();
    clear_env();

    assert_eq!(config.pipeline.region, "us-east-2");
    assert_eq!(
        crate::pipeline::ArtifactStore::from_config(&config).path(ArtifactKind::Outline),
        temp_dir.path().join("brief.md")
    );
    assert_eq!(
        config.event_log_path(),
        Some(temp_dir.path().join(".quill/events.ndjson"))
    );
}

#[test]
#[serial]
fn test_config_load_region_env_override() {
    set_full_env();
    // SAFETY: serial test.
    unsafe { std::env::set_var(REGION_ENV, "eu-west-1") };
    let temp_dir = TempDir::new().unwrap();

    let config = Config::load(temp_dir.path(), None).unwrap();
    clear_env();

    assert_eq!(config.pipeline.region, "eu-west-1");
}

#[test]
#[serial]
fn test_config_load_missing_explicit_file_fails() {
    set_full_env();
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.yaml");

    let result = Config::load(temp_dir.path(), Some(&missing));
    clear_env();

    assert!(result.unwrap_err().to_string().contains("nope.yaml"));
}

#[test]
#[serial]
fn test_config_load_missing_env_fails_before_reading_files() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    let err = Config::load(temp_dir.path(), None).unwrap_err();
    assert!(err.to_string().contains("FUSIONAUTH_API_KEY"));
}
