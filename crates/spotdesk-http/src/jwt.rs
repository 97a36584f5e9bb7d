//! Access-token expiry extraction.

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    #[serde(default)]
    exp: Option<i64>,
}

/// Reads the `exp` claim of a JWT without verifying its signature.
///
/// The client holds no signing key; the backend stays the authority on
/// validity. A decodable JWT without `exp` is reported as expired at the
/// Unix epoch. Returns `None` only when the token cannot be decoded.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    DateTime::from_timestamp(data.claims.exp.unwrap_or(0), 0)
}
