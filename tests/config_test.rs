//! 配置解析测试

use std::time::Duration;

use warden_core::{ErrorCode, GuardConfig};

#[test]
fn test_minimal_config_uses_defaults() {
    let config = GuardConfig::from_toml_str(
        r#"
        [jwt]
        secret = "s3cret"
        "#,
    )
    .unwrap();

    assert_eq!(config.jwt.expire_days, 7);
    assert_eq!(config.flow.window(), Duration::from_secs(3));
    assert_eq!(config.flow.threshold, 10);
    assert_eq!(config.flow.block(), Duration::from_secs(30));
    assert_eq!(config.verify.code_ttl(), Duration::from_secs(180));
    assert_eq!(config.verify.cooldown(), Duration::from_secs(60));
    assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
}

#[test]
fn test_sections_override_defaults() {
    let config = GuardConfig::from_toml_str(
        r#"
        [jwt]
        secret = "s3cret"
        expire_days = 1

        [flow]
        window_secs = 10
        threshold = 100
        block_secs = 600

        [mail]
        topic = "verification-mail"
        "#,
    )
    .unwrap();

    assert_eq!(config.jwt.lifetime(), chrono::Duration::days(1));
    assert_eq!(config.flow.threshold, 100);
    assert_eq!(config.flow.block(), Duration::from_secs(600));
    assert_eq!(config.mail.topic, "verification-mail");
}

#[test]
fn test_empty_secret_is_rejected() {
    let err = GuardConfig::from_toml_str(
        r#"
        [jwt]
        secret = ""
        "#,
    )
    .unwrap_err();
    assert!(err.is(ErrorCode::ConfigurationError));
}

#[test]
fn test_missing_jwt_section_is_rejected() {
    let err = GuardConfig::from_toml_str("[flow]\nthreshold = 5\n").unwrap_err();
    assert!(err.is(ErrorCode::ConfigurationError));
}

#[test]
fn test_zero_threshold_is_rejected() {
    let err = GuardConfig::from_toml_str(
        r#"
        [jwt]
        secret = "s3cret"

        [flow]
        threshold = 0
        "#,
    )
    .unwrap_err();
    assert!(err.is(ErrorCode::ConfigurationError));
}

#[test]
fn test_out_of_range_periods_are_rejected() {
    let cases = [
        "[jwt]\nsecret = \"s3cret\"\nexpire_days = 100000000\n",
        "[jwt]\nsecret = \"s3cret\"\nexpire_days = 0\n",
        "[jwt]\nsecret = \"s3cret\"\n[verify]\ncode_ttl_minutes = 9999999\n",
        "[jwt]\nsecret = \"s3cret\"\n[flow]\nblock_secs = 9999999999\n",
        "[jwt]\nsecret = \"s3cret\"\n[verify]\ncooldown_secs = 9999999999\n",
    ];
    for raw in cases {
        let err = GuardConfig::from_toml_str(raw).unwrap_err();
        assert!(err.is(ErrorCode::ConfigurationError), "{raw}");
    }
}

#[test]
fn test_longest_accepted_periods() {
    let config = GuardConfig::from_toml_str(&format!(
        "[jwt]\nsecret = \"s3cret\"\nexpire_days = {}\n[verify]\ncode_ttl_minutes = {}\n",
        warden_core::config::MAX_EXPIRE_DAYS,
        warden_core::config::MAX_CODE_TTL_MINUTES,
    ))
    .unwrap();
    assert_eq!(config.verify.code_ttl(), Duration::from_secs(24 * 3600));
}
