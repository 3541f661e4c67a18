//! Authentication configuration.

use jsonwebtoken::Algorithm;

/// Configuration for the credential service.
///
/// Constructed explicitly at startup and passed to [`crate::AuthService`]
/// and the lifecycle manager — there is no ambient global.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Server-held secret used to sign and verify tokens.
    pub jwt_secret: String,
    /// Signing algorithm. Must be an HMAC variant (HS256/384/512),
    /// since issuance and validation share `jwt_secret`.
    pub jwt_algorithm: Algorithm,
    /// Access token lifetime in seconds (default: 3600 = 1 hour).
    pub access_token_lifetime_secs: u64,
    /// Optional pepper prepended to passwords before Argon2id hashing
    /// and verification.
    pub pepper: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "changeme".into(),
            jwt_algorithm: Algorithm::HS256,
            access_token_lifetime_secs: 3600,
            pepper: None,
        }
    }
}
