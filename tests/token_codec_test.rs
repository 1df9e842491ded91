//! 令牌签发与校验测试

use chrono::{Duration, SubsecRound, TimeZone, Utc};
use warden_core::auth::bearer_token;
use warden_core::{ErrorCode, Principal, TokenCodec};

fn alice() -> Principal {
    Principal::new(7, "alice", ["user"])
}

fn codec() -> TokenCodec {
    TokenCodec::new("test-secret", Duration::days(7))
}

#[test]
fn test_verify_within_lifetime_yields_principal() {
    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let issued = codec().issue(&alice(), t0).unwrap();

    for offset in [Duration::zero(), Duration::days(3), Duration::days(7)] {
        let claims = codec().verify(&issued.token, t0 + offset).unwrap();
        assert_eq!(claims.principal(), alice());
        assert_eq!(claims.iat, t0.timestamp());
        assert_eq!(claims.exp, (t0 + Duration::days(7)).timestamp());
    }
}

#[test]
fn test_verify_after_expiry_fails() {
    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let issued = codec().issue(&alice(), t0).unwrap();

    let err = codec()
        .verify(&issued.token, t0 + Duration::days(7) + Duration::seconds(1))
        .unwrap_err();
    assert!(err.is(ErrorCode::TokenExpired));
}

#[test]
fn test_wrong_secret_is_signature_mismatch() {
    let t0 = Utc::now();
    let issued = codec().issue(&alice(), t0).unwrap();

    let other = TokenCodec::new("another-secret", Duration::days(7));
    let err = other.verify(&issued.token, t0).unwrap_err();
    assert!(err.is(ErrorCode::TokenSignatureMismatch));
    assert!(other.extract_id(&issued.token).is_err());
}

#[test]
fn test_garbage_token_is_invalid() {
    let err = codec().verify("not.a.jwt", Utc::now()).unwrap_err();
    assert!(err.is(ErrorCode::TokenInvalid));
}

#[test]
fn test_each_issue_has_fresh_token_id() {
    let t0 = Utc::now();
    let first = codec().issue(&alice(), t0).unwrap();
    let second = codec().issue(&alice(), t0).unwrap();

    assert_ne!(first.claims.jti, second.claims.jti);
    assert_eq!(
        codec().extract_id(&first.token).unwrap().to_string(),
        first.claims.jti
    );
}

#[test]
fn test_extract_expiry_ignores_expiration() {
    let t0 = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let issued = codec().issue(&alice(), t0).unwrap();

    let expiry = codec().extract_expiry(&issued.token).unwrap();
    assert_eq!(expiry, t0 + Duration::days(7));
}

#[test]
fn test_bearer_token_parsing() {
    assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    assert_eq!(bearer_token(Some("Basic dXNlcg==")), None);
    assert_eq!(bearer_token(None), None);
}

#[test]
fn test_sub_second_issue_time_gets_no_grace() {
    let whole = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let t0 = whole + Duration::milliseconds(700);
    let codec = TokenCodec::new("test-secret", Duration::days(1));
    let issued = codec.issue(&alice(), t0).unwrap();

    assert_eq!(issued.claims.iat, t0.trunc_subsecs(0).timestamp());
    assert_eq!(issued.claims.exp, (whole + Duration::days(1)).timestamp());

    assert!(codec.verify(&issued.token, whole + Duration::days(1)).is_ok());
    let err = codec
        .verify(&issued.token, t0 + Duration::days(1) + Duration::milliseconds(200))
        .unwrap_err();
    assert!(err.is(ErrorCode::TokenExpired));
    let err = codec
        .verify(&issued.token, whole + Duration::days(1) + Duration::milliseconds(1))
        .unwrap_err();
    assert!(err.is(ErrorCode::TokenExpired));
}

#[test]
fn test_unrepresentable_lifetime_is_an_error() {
    let codec = TokenCodec::new("test-secret", Duration::days(100_000_000));
    let err = codec.issue(&alice(), Utc::now()).unwrap_err();
    assert!(err.is(ErrorCode::ConfigurationError));
}
