//! Bearer token decoding.
//!
//! Tokens are compact three-segment JWTs. Only the payload segment is read;
//! the signature is the issuing server's concern.

use std::collections::BTreeSet;

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::claims::ClaimSet;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The payload could not be read into a claim set with `sub` and `id`.
    #[error("malformed access token: {reason}")]
    Malformed { reason: String },

    /// The `exp` claim lies in the past.
    #[error("access token expired at {}", expired_at.to_rfc3339())]
    Expired { expired_at: DateTime<Utc> },
}

impl DecodeError {
    fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: Option<String>,
    id: Option<i64>,
    roles: Option<Vec<String>>,
    /// NumericDate: seconds, possibly fractional.
    iat: Option<f64>,
    exp: Option<f64>,
}

/// Decode and validate `token` against the current time.
///
/// # Errors
///
/// Returns `DecodeError::Malformed` if the token is structurally unusable and
/// `DecodeError::Expired` if its `exp` claim has passed.
pub fn decode(token: &str) -> Result<ClaimSet, DecodeError> {
    decode_at(token, Utc::now())
}

/// Decode and validate `token` against an explicit clock.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_at(token: &str, now: DateTime<Utc>) -> Result<ClaimSet, DecodeError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::malformed(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    let payload = decode_segment(segments[1])?;
    let raw: RawClaims = serde_json::from_slice(&payload)
        .map_err(|e| DecodeError::malformed(format!("payload is not a claim object: {e}")))?;

    let subject = raw
        .sub
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DecodeError::malformed("missing sub claim"))?;
    let id = raw
        .id
        .ok_or_else(|| DecodeError::malformed("missing id claim"))?;
    let issued_at = raw.iat.map(|iat| timestamp("iat", iat)).transpose()?;
    let expires_at = raw.exp.map(|exp| timestamp("exp", exp)).transpose()?;

    let claims = ClaimSet {
        subject,
        id,
        roles: raw.roles.unwrap_or_default().into_iter().collect::<BTreeSet<_>>(),
        issued_at,
        expires_at,
    };

    if claims.is_expired_at(now)
        && let Some(expired_at) = claims.expires_at
    {
        return Err(DecodeError::Expired { expired_at });
    }

    Ok(claims)
}

/// Base64url segment decode, tolerating `=` padding and the standard alphabet.
fn decode_segment(segment: &str) -> Result<Vec<u8>, DecodeError> {
    let unpadded = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(unpadded)
        .or_else(|_| STANDARD_NO_PAD.decode(unpadded))
        .map_err(|e| DecodeError::malformed(format!("base64 decode failed: {e}")))
}

/// Whole milliseconds, rounded down, so the strict `exp < now` check in
/// milliseconds gives the same answer as comparing the exact value.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn timestamp(claim: &str, secs: f64) -> Result<DateTime<Utc>, DecodeError> {
    let millis = (secs * 1000.0).floor();
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return Err(DecodeError::malformed(format!("{claim} claim out of range")));
    }
    DateTime::from_timestamp_millis(millis as i64)
        .ok_or_else(|| DecodeError::malformed(format!("{claim} claim out of range")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn make_jwt(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS512"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload);
        let signature = URL_SAFE_NO_PAD.encode("fake_sig");
        format!("{header}.{payload}.{signature}")
    }

    #[test]
    fn decodes_full_claim_set() {
        let now = Utc::now();
        let exp = now.timestamp() + 3600;
        let jwt = make_jwt(&format!(
            r#"{{"sub":"alice","id":7,"roles":["ROLE_USER","ROLE_ADMIN"],"iat":{},"exp":{exp}}}"#,
            now.timestamp()
        ));

        let claims = decode_at(&jwt, now).expect("valid token");
        assert_eq!(claims.subject, "alice");
        assert_eq!(claims.id, 7);
        assert!(claims.roles.contains("ROLE_ADMIN"));
        assert_eq!(claims.expires_at.map(|t| t.timestamp()), Some(exp));
        assert!(claims.issued_at.is_some());
    }

    #[test]
    fn roles_and_times_are_optional() {
        let claims = decode(&make_jwt(r#"{"sub":"bob","id":2}"#)).expect("valid token");
        assert!(claims.roles.is_empty());
        assert_eq!(claims.expires_at, None);
        assert_eq!(claims.issued_at, None);
    }

    #[test]
    fn past_exp_is_expired() {
        let now = Utc::now();
        let exp = now.timestamp() - 10;
        let jwt = make_jwt(&format!(r#"{{"sub":"alice","id":7,"exp":{exp}}}"#));
        let err = decode_at(&jwt, now).expect_err("expired");
        assert!(matches!(err, DecodeError::Expired { expired_at } if expired_at.timestamp() == exp));
    }

    #[test]
    fn exp_equal_to_now_is_accepted() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).expect("valid time");
        let jwt = make_jwt(r#"{"sub":"alice","id":7,"exp":1700000000}"#);
        assert!(decode_at(&jwt, now).is_ok());
    }

    #[test]
    fn one_millisecond_past_exp_is_expired() {
        let now = DateTime::from_timestamp(1_700_000_000, 1_000_000).expect("valid time");
        let jwt = make_jwt(r#"{"sub":"alice","id":7,"exp":1700000000}"#);
        assert!(matches!(
            decode_at(&jwt, now),
            Err(DecodeError::Expired { .. })
        ));
    }

    #[test]
    fn fractional_timestamps_are_accepted() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).expect("valid time");
        let jwt = make_jwt(
            r#"{"sub":"alice","id":7,"iat":1699999000.25,"exp":1700003600.5}"#,
        );

        let claims = decode_at(&jwt, now).expect("fractional exp is valid");
        assert_eq!(
            claims.expires_at.map(|t| t.timestamp_millis()),
            Some(1_700_003_600_500)
        );
        assert_eq!(
            claims.issued_at.map(|t| t.timestamp_millis()),
            Some(1_699_999_000_250)
        );
    }

    #[test]
    fn fractional_exp_expires_by_the_millisecond() {
        let jwt = make_jwt(r#"{"sub":"alice","id":7,"exp":1700000000.5}"#);
        let at_exp = DateTime::from_timestamp_millis(1_700_000_000_500).expect("valid time");
        let just_after = DateTime::from_timestamp_millis(1_700_000_000_501).expect("valid time");

        assert!(decode_at(&jwt, at_exp).is_ok());
        assert!(matches!(
            decode_at(&jwt, just_after),
            Err(DecodeError::Expired { .. })
        ));
    }

    #[rstest]
    #[case::string_exp(r#"{"sub":"alice","id":7,"exp":"soon"}"#, "payload is not a claim object")]
    #[case::huge_exp(r#"{"sub":"alice","id":7,"exp":1e300}"#, "exp claim out of range")]
    #[case::missing_sub(r#"{"id":7}"#, "missing sub claim")]
    #[case::empty_sub(r#"{"sub":"","id":7}"#, "missing sub claim")]
    #[case::missing_id(r#"{"sub":"alice"}"#, "missing id claim")]
    #[case::null_id(r#"{"sub":"alice","id":null}"#, "missing id claim")]
    #[case::string_id(r#"{"sub":"alice","id":"7"}"#, "payload is not a claim object")]
    #[case::numeric_sub(r#"{"sub":5,"id":7}"#, "payload is not a claim object")]
    #[case::roles_not_list(r#"{"sub":"alice","id":7,"roles":"ROLE_ADMIN"}"#, "payload is not a claim object")]
    #[case::not_json("definitely not json", "payload is not a claim object")]
    fn malformed_payloads(#[case] payload: &str, #[case] expected: &str) {
        let err = decode(&make_jwt(payload)).expect_err("malformed");
        assert!(matches!(err, DecodeError::Malformed { .. }));
        assert!(
            err.to_string().contains(expected),
            "unexpected message: {err}"
        );
    }

    #[test]
    fn malformed_wins_over_expired() {
        let jwt = make_jwt(r#"{"sub":"alice","exp":1}"#);
        assert!(matches!(decode(&jwt), Err(DecodeError::Malformed { .. })));
    }

    #[test]
    fn wrong_segment_count_is_malformed() {
        let err = decode("not-a-jwt").expect_err("malformed");
        assert!(err.to_string().contains("expected 3 segments, found 1"));
    }

    #[test]
    fn bad_base64_is_malformed() {
        let err = decode("header.!!!invalid!!!.signature").expect_err("malformed");
        assert!(err.to_string().contains("base64 decode failed"));
    }

    #[test]
    fn padded_payload_is_accepted() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS512"}"#);
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"sub":"al","id":1}"#);
        let jwt = format!("{header}.{payload}.sig");
        assert_eq!(decode(&jwt).expect("valid").subject, "al");
    }
}
