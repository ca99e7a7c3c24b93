//! HS256 session tokens. One token type, 24 hour expiry, issuer-checked.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const ISSUER: &str = "foliohost";
const SESSION_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to create session token: {0}")]
    Create(String),

    #[error("Session token is expired or invalid")]
    Invalid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: Uuid,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues a session token for the given account.
pub fn issue(account_id: Uuid, secret: &str) -> Result<String, SessionError> {
    let now = Utc::now();
    let claims = Claims {
        sub: account_id,
        iss: ISSUER.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(SESSION_HOURS)).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| SessionError::Create(e.to_string()))
}

/// Validates signature, expiry and issuer, returning the claims.
pub fn verify(token: &str, secret: &str) -> Result<Claims, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| SessionError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-session-secret-at-least-32-bytes";

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let account_id = Uuid::new_v4();
        let token = issue(account_id, SECRET).unwrap();
        let claims = verify(&token, SECRET).unwrap();
        assert_eq!(claims.sub, account_id);
        assert_eq!(claims.iss, ISSUER);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue(Uuid::new_v4(), SECRET).unwrap();
        assert!(verify(&token, "a-different-secret-entirely-here").is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(verify("not.a.token", SECRET).is_err());
    }
}
