//! Signed token issuance and verification
//!
//! Tokens are HS256 JWTs asserting `{email, role}` with a configured
//! expiration, verified statelessly by signature — no session store.

use crate::core::error::AuthError;
use crate::core::user::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims carried by an issued token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the authenticated user
    pub sub: String,

    /// Role granted at registration
    pub role: Role,

    /// Expiry as a unix timestamp
    pub exp: i64,
}

/// Issues and verifies tokens with a server-held secret
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Sign a token for an authenticated user
    pub fn issue(&self, email: &str, role: Role) -> Result<String, AuthError> {
        let claims = Claims {
            sub: email.to_string(),
            role,
            exp: (Utc::now() + self.ttl).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Token {
            message: e.to_string(),
        })
    }

    /// Check a token's signature and expiry, returning its claims
    ///
    /// Any failure — bad signature, expired, garbage input — collapses to
    /// [`AuthError::InvalidCredentials`] so callers cannot distinguish why
    /// a token was rejected.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", Duration::hours(1))
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let token = issuer().issue("alice@example.com", Role::User).unwrap();
        assert!(!token.is_empty());

        let claims = issuer().verify(&token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.role, Role::User);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_admin_role_survives_round_trip() {
        let token = issuer().issue("root@example.com", Role::Admin).unwrap();
        let claims = issuer().verify(&token).unwrap();
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issuer().issue("alice@example.com", Role::User).unwrap();
        let other = TokenIssuer::new("different-secret", Duration::hours(1));
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = issuer().issue("alice@example.com", Role::User).unwrap();
        let tampered = format!("{}x", token);
        assert!(issuer().verify(&tampered).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // TTL far enough in the past to clear the default validation leeway.
        let expired = TokenIssuer::new("test-secret", Duration::hours(-2));
        let token = expired.issue("alice@example.com", Role::User).unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn test_garbage_input_is_rejected() {
        assert!(issuer().verify("not.a.token").is_err());
    }
}
