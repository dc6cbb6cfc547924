//! Unit tests for layered EngineConfig loading

use conditionlet_sdk::{ConditionEngine, EngineConfig, SdkError};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    fs::write(dir.path().join(format!("{}.yaml", name)), content).unwrap();
    dir.path().join(name).to_string_lossy().to_string()
}

#[test]
fn test_missing_file_yields_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let base = dir.path().join("absent").to_string_lossy().to_string();

    let config = EngineConfig::load_from(&base, "CONDTEST_ABSENT")?;
    assert_eq!(config, EngineConfig::default());
    Ok(())
}

#[test]
fn test_file_values_are_loaded() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let base = write_config(
        &dir,
        "conditionlets",
        r#"
ip_headers:
  - True-Client-IP
  - X-Forwarded-For
allow_ipv6_netmask: false
regex:
  max_pattern_len: 200
"#,
    );

    let config = EngineConfig::load_from(&base, "CONDTEST_FILE")?;
    assert_eq!(config.ip_headers, vec!["True-Client-IP", "X-Forwarded-For"]);
    assert!(!config.allow_ipv6_netmask);
    assert_eq!(config.regex.max_pattern_len, 200);
    assert!(config.enable_metrics);
    Ok(())
}

#[test]
fn test_environment_overrides_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let base = write_config(&dir, "conditionlets", "enable_metrics: true\nlog_level: debug\n");

    std::env::set_var("CONDTEST_ENV_ENABLE_METRICS", "false");
    std::env::set_var("CONDTEST_ENV_REGEX__MAX_PATTERN_LEN", "64");
    std::env::set_var("CONDTEST_ENV_IP_HEADERS", "CF-Connecting-IP,X-Real-IP");

    let config = EngineConfig::load_from(&base, "CONDTEST_ENV")?;
    assert!(!config.enable_metrics);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.regex.max_pattern_len, 64);
    assert_eq!(config.ip_headers, vec!["CF-Connecting-IP", "X-Real-IP"]);
    Ok(())
}

#[test]
fn test_invalid_file_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let base = write_config(&dir, "conditionlets", "ip_headers: []\n");

    let result = EngineConfig::load_from(&base, "CONDTEST_INVALID");
    assert!(matches!(result, Err(SdkError::ConfigError(_))));
    Ok(())
}

#[test]
fn test_yaml_file_builds_engine() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("engine.yaml");
    fs::write(&path, "ip_headers: [X-Real-IP]\nenable_metrics: false\n")?;

    let config = EngineConfig::from_yaml_file(&path)?;
    let engine = ConditionEngine::builder().with_config(config).build()?;
    assert!(engine.metrics().is_none());

    let ctx = engine.request_context().with_header("X-Real-IP", "10.9.8.7");
    assert!(engine.evaluate("UsersIpAddress", &ctx, "startsWith", &["10.9.".into()]));
    Ok(())
}

#[test]
fn test_missing_yaml_file_is_io_error() {
    let result = EngineConfig::from_yaml_file("/nonexistent/conditionlets.yaml");
    assert!(matches!(result, Err(SdkError::IoError(_))));
}
