//! Signed session tokens.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. A token is
//! valid from issuance until `exp`; it cannot be renewed or revoked, so a
//! logout only discards the client's copy.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::types::DbId;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject -- the authenticated user's id.
    pub sub: DbId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Signing configuration for session tokens.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Issues and verifies bearer session tokens.
pub trait TokenService: Send + Sync {
    /// Sign a token for `user_id` that expires `ttl` from now.
    fn generate_token(&self, user_id: DbId, ttl: Duration) -> CoreResult<String>;

    /// Check signature, structure and expiry, returning the decoded claims.
    fn validate_token(&self, token: &str) -> CoreResult<Claims>;
}

/// [`TokenService`] backed by `jsonwebtoken`.
///
/// Expiry is checked against the injected [`Clock`] with no leeway, so a
/// fixed key and clock always produce the same token.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(config: &JwtConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced in `validate_token` against `clock`.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, user_id: DbId, ttl: Duration) -> CoreResult<String> {
        if ttl <= Duration::zero() {
            return Err(CoreError::Validation(
                "Token lifetime must be positive".into(),
            ));
        }

        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| CoreError::Validation("Token lifetime is out of range".into()))?;
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CoreError::Internal(format!("Token signing failed: {e}")))
    }

    fn validate_token(&self, token: &str) -> CoreResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| CoreError::InvalidToken(e.to_string()))?;

        if data.claims.exp <= self.clock.now().timestamp() {
            return Err(CoreError::InvalidToken("Token has expired".into()));
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::clock::FixedClock;

    fn service(secret: &str, clock: Arc<FixedClock>) -> JwtTokenService {
        JwtTokenService::new(
            &JwtConfig {
                secret: secret.to_string(),
            },
            clock,
        )
    }

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2030, 6, 1, 8, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn test_generate_and_validate() {
        let clock = clock();
        let tokens = service("test-secret-that-is-long-enough-for-hmac", clock.clone());
        let user_id = Uuid::new_v4();

        let token = tokens.generate_token(user_id, Duration::hours(1)).unwrap();
        let claims = tokens.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.iat, clock.now().timestamp());
    }

    #[test]
    fn test_expired_token_fails() {
        let clock = clock();
        let tokens = service("secret", clock.clone());
        let token = tokens
            .generate_token(Uuid::new_v4(), Duration::hours(1))
            .unwrap();

        clock.advance(Duration::minutes(59));
        assert!(tokens.validate_token(&token).is_ok());

        clock.advance(Duration::minutes(1));
        assert_matches!(tokens.validate_token(&token), Err(CoreError::InvalidToken(_)));
    }

    #[test]
    fn test_different_secrets_fail() {
        let clock = clock();
        let a = service("secret-alpha", clock.clone());
        let b = service("secret-bravo", clock);

        let token = a.generate_token(Uuid::new_v4(), Duration::hours(1)).unwrap();
        assert_matches!(b.validate_token(&token), Err(CoreError::InvalidToken(_)));
    }

    #[test]
    fn test_malformed_token_fails() {
        let tokens = service("secret", clock());
        assert_matches!(
            tokens.validate_token("not.a.jwt"),
            Err(CoreError::InvalidToken(_))
        );
        assert_matches!(tokens.validate_token(""), Err(CoreError::InvalidToken(_)));
    }

    #[test]
    fn test_tampered_payload_fails() {
        let tokens = service("secret", clock());
        let token = tokens
            .generate_token(Uuid::new_v4(), Duration::hours(1))
            .unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let other = tokens
            .generate_token(Uuid::new_v4(), Duration::hours(1))
            .unwrap();
        parts[1] = other.split('.').nth(1).unwrap().to_string();
        let forged = parts.join(".");

        assert_matches!(tokens.validate_token(&forged), Err(CoreError::InvalidToken(_)));
    }

    #[test]
    fn test_issuance_is_deterministic_for_fixed_clock() {
        let tokens = service("secret", clock());
        let user_id = Uuid::new_v4();

        let first = tokens.generate_token(user_id, Duration::hours(24)).unwrap();
        let second = tokens.generate_token(user_id, Duration::hours(24)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_positive_ttl_is_rejected() {
        let tokens = service("secret", clock());
        assert_matches!(
            tokens.generate_token(Uuid::new_v4(), Duration::zero()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_overflowing_ttl_is_rejected() {
        let tokens = service("secret", clock());
        assert_matches!(
            tokens.generate_token(Uuid::new_v4(), Duration::days(365 * 1_000_000)),
            Err(CoreError::Validation(_))
        );
    }
}
