//! Admin authentication flow — credential check and token issuance.

use orgdir_core::error::{OrgDirError, OrgDirResult};
use orgdir_core::models::OrganizationRecord;
use orgdir_core::repository::TenantDirectory;
use tracing::info;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;
use crate::token::ValidatedClaims;

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed bearer token asserting organization ownership.
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    /// Organization the authenticated admin owns.
    pub organization_name: String,
}

/// Authentication service.
///
/// Generic over the directory implementation so that the auth layer
/// has no dependency on the storage crate.
pub struct AuthService<D: TenantDirectory> {
    directory: D,
    config: AuthConfig,
}

impl<D: TenantDirectory> AuthService<D> {
    pub fn new(directory: D, config: AuthConfig) -> Self {
        Self { directory, config }
    }

    /// Authenticate an admin by email + password.
    ///
    /// Unknown email and wrong password both fail with `Unauthorized`;
    /// the unknown-email path still performs an Argon2 verification
    /// (against a fixed dummy hash) so the two failures are outwardly
    /// indistinguishable.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> OrgDirResult<OrganizationRecord> {
        let pepper = self.config.pepper.as_deref();

        let Some(org) = self.directory.find_by_admin_email(email).await? else {
            let _ = password::verify_password(password, password::DUMMY_HASH, pepper);
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = password::verify_password(password, &org.admin.password_hash, pepper)
            .map_err(|e| OrgDirError::Crypto(e.to_string()))?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        info!(
            email = %email,
            organization = %org.organization_name,
            "Admin authenticated"
        );
        Ok(org)
    }

    /// Authenticate and issue a signed access token.
    pub async fn login(&self, email: &str, password: &str) -> OrgDirResult<LoginOutput> {
        let org = self.authenticate(email, password).await?;

        let access_token =
            token::issue_access_token(email, &org.organization_name, &self.config)
                .map_err(OrgDirError::from)?;

        Ok(LoginOutput {
            access_token,
            expires_in: self.config.access_token_lifetime_secs,
            organization_name: org.organization_name,
        })
    }

    /// Validate a bearer token and return its claims.
    ///
    /// Stateless: the referenced organization is not re-checked against
    /// the directory.
    pub fn validate_token(&self, token: &str) -> OrgDirResult<ValidatedClaims> {
        token::validate_access_token(token, &self.config).map_err(OrgDirError::from)
    }
}
