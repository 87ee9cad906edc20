//! Bearer token issuance and verification
//!
//! Stateless HS256 tokens carrying the user's identity. The signing secret
//! is held by this service alone; rotation would touch nothing outside it.
//! Verification is pure: no store access, no clock mutation, same token in,
//! same claims out.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Claims carried by every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject)
    pub sub: String,
    /// Username at issue time
    pub username: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

#[derive(Clone)]
pub struct TokenService {
    secret: String,
    lifetime_secs: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, lifetime_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            lifetime_secs,
        }
    }

    /// Sign a token for the given identity. With a well-formed secret this
    /// cannot fail per-request; the secret's presence is checked at startup.
    pub fn issue(&self, username: &str, user_id: &str) -> Result<String, CatalogError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: (now + Duration::seconds(self.lifetime_secs)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| CatalogError::Store(format!("failed to sign token: {e}")))
    }

    /// Verify a presented token and return its claims. Bad signature,
    /// malformed input and expiry all come back as `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Claims, CatalogError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| CatalogError::InvalidToken(e.to_string()))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-signing-secret", 3600)
    }

    fn mutate_at(token: &str, idx: usize) -> String {
        let mut chars: Vec<char> = token.chars().collect();
        chars[idx] = if chars[idx] == 'x' { 'y' } else { 'x' };
        chars.into_iter().collect()
    }

    #[test]
    fn round_trip_preserves_identity() {
        let tokens = service();
        let token = tokens.issue("ada", "user-1").unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.username, "ada");
        assert_eq!(claims.sub, "user-1");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_every_single_character_mutation() {
        let tokens = service();
        let token = tokens.issue("ada", "user-1").unwrap();

        for idx in 0..token.len() {
            let forged = mutate_at(&token, idx);
            assert_ne!(forged, token);
            let err = tokens.verify(&forged).unwrap_err();
            assert_matches!(err, CatalogError::InvalidToken(_), "position {idx} got through");
        }
    }

    #[test]
    fn rejects_token_signed_with_another_secret() {
        let other = TokenService::new("some-other-secret", 3600);
        let token = other.issue("ada", "user-1").unwrap();
        let err = service().verify(&token).unwrap_err();
        assert_matches!(err, CatalogError::InvalidToken(_));
    }

    #[test]
    fn rejects_expired_token() {
        // Issued already an hour past its expiry, well beyond the
        // validator's clock leeway.
        let tokens = TokenService::new("test-signing-secret", -3600);
        let token = tokens.issue("ada", "user-1").unwrap();
        let err = tokens.verify(&token).unwrap_err();
        assert_matches!(err, CatalogError::InvalidToken(_));
    }
}
