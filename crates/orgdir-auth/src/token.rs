//! Signed access token issuance and validation.
//!
//! Tokens assert administrator identity and organization ownership.
//! Validation checks signature and expiry only — it never consults the
//! directory, so tokens of a renamed or deleted organization remain
//! structurally valid until they expire. There is no revocation by
//! design; callers needing freshness must re-resolve the organization
//! against the directory.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Role claim carried by every admin access token.
pub const ROLE_ADMIN: &str = "admin";

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Email of the admin the token was issued to.
    pub admin_email: String,
    /// Organization the admin owned at issuance time.
    pub organization_name: String,
    /// Always `"admin"`.
    pub role: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issue a signed access token asserting organization ownership.
pub fn issue_access_token(
    admin_email: &str,
    organization_name: &str,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        admin_email: admin_email.to_string(),
        organization_name: organization_name.to_string(),
        role: ROLE_ADMIN.to_string(),
        iat: now,
        exp: now + config.access_token_lifetime_secs as i64,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    let header = Header::new(config.jwt_algorithm);
    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("token encode: {e}")))
}

/// Decode and verify an access token's signature and expiry.
pub fn decode_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<AccessTokenClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(config.jwt_algorithm);
    validation.set_required_spec_claims(&["exp"]);
    validation.leeway = 0;

    jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Validated token claims — a newtype proving the token was verified.
#[derive(Debug, Clone)]
pub struct ValidatedClaims(pub AccessTokenClaims);

/// Validate an access token (signature, expiry) and return the
/// verified claims.
///
/// Purely stateless — no directory lookup is performed.
pub fn validate_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<ValidatedClaims, AuthError> {
    decode_access_token(token, config).map(ValidatedClaims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".into(),
            ..AuthConfig::default()
        }
    }

    /// Encode claims with an arbitrary expiry using the test secret.
    fn encode_with_exp(exp: i64, config: &AuthConfig) -> String {
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            admin_email: "admin@acme.test".into(),
            organization_name: "Acme Corp".into(),
            role: ROLE_ADMIN.into(),
            iat: now,
            exp,
        };
        let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        jsonwebtoken::encode(&Header::new(config.jwt_algorithm), &claims, &key).unwrap()
    }

    #[test]
    fn token_roundtrip() {
        let config = test_config();
        let token = issue_access_token("admin@acme.test", "Acme Corp", &config).unwrap();
        let claims = decode_access_token(&token, &config).unwrap();

        assert_eq!(claims.admin_email, "admin@acme.test");
        assert_eq!(claims.organization_name, "Acme Corp");
        assert_eq!(claims.role, ROLE_ADMIN);
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let token = encode_with_exp(Utc::now().timestamp() - 120, &config);

        match decode_access_token(&token, &config) {
            Err(AuthError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {other:?}"),
        }
    }

    #[test]
    fn unexpired_token_validates() {
        let config = test_config();
        let token = encode_with_exp(Utc::now().timestamp() + 300, &config);
        assert!(validate_access_token(&token, &config).is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config();
        let token = issue_access_token("admin@acme.test", "Acme Corp", &config).unwrap();

        let other = AuthConfig {
            jwt_secret: "different-secret".into(),
            ..AuthConfig::default()
        };
        match decode_access_token(&token, &other) {
            Err(AuthError::TokenInvalid(_)) => {}
            other => panic!("expected TokenInvalid, got {other:?}"),
        }
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = test_config();
        assert!(matches!(
            decode_access_token("not.a.token", &config),
            Err(AuthError::TokenInvalid(_))
        ));
    }
}
