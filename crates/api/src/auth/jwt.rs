//! JWT access-token validation.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. The
//! signature, expiration, and issued-at claims are fully validated before
//! any embedded identity is trusted; decode-without-verify is not an
//! option here.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: String,
    /// The user's email, when the identity provider supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for JWT token validation (and generation, in tests and
/// tooling).
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: &str,
    email: Option<&str>,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.access_token_expiry_mins * 60;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.map(str::to_string),
        exp,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically; a token that does
/// not verify against the configured secret never yields claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".to_string(),
            access_token_expiry_mins: 60,
        }
    }

    #[test]
    fn generated_token_round_trips() {
        let cfg = config();
        let token = generate_access_token("user-1", Some("u@example.com"), &cfg).unwrap();
        let claims = validate_token(&token, &cfg).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("u@example.com"));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let cfg = config();
        let other = JwtConfig {
            secret: "different-secret".to_string(),
            access_token_expiry_mins: 60,
        };
        let token = generate_access_token("user-1", None, &other).unwrap();
        assert!(validate_token(&token, &cfg).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = JwtConfig {
            secret: "unit-test-secret".to_string(),
            access_token_expiry_mins: -10,
        };
        let token = generate_access_token("user-1", None, &cfg).unwrap();
        assert!(validate_token(&token, &cfg).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(validate_token("not-a-jwt", &config()).is_err());
    }
}
