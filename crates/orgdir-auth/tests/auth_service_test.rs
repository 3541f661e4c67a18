//! Integration tests for the admin authentication flow using
//! in-memory SurrealDB.

use orgdir_auth::config::AuthConfig;
use orgdir_auth::password;
use orgdir_auth::service::AuthService;
use orgdir_auth::token::ROLE_ADMIN;
use orgdir_core::error::OrgDirError;
use orgdir_core::models::{AdminIdentity, NewOrganizationRecord, UpdateOrganizationRecord};
use orgdir_core::repository::TenantDirectory;
use orgdir_db::repository::SurrealTenantDirectory;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".into(),
        ..AuthConfig::default()
    }
}

async fn setup() -> SurrealTenantDirectory<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    orgdir_db::run_migrations(&db).await.unwrap();
    SurrealTenantDirectory::new(db)
}

async fn seed_org(
    directory: &SurrealTenantDirectory<surrealdb::engine::local::Db>,
    name: &str,
    email: &str,
    plaintext: &str,
) {
    let password_hash = password::hash_password(plaintext, None).unwrap();
    directory
        .insert(NewOrganizationRecord {
            organization_name: name.into(),
            partition_id: format!("org_{}", name.to_lowercase().replace(' ', "_")),
            admin: AdminIdentity {
                email: email.into(),
                password_hash,
            },
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn login_issues_a_validating_token() {
    let directory = setup().await;
    seed_org(&directory, "Acme Corp", "a@x.com", "secret1").await;
    let auth = AuthService::new(directory, test_config());

    let output = auth.login("a@x.com", "secret1").await.unwrap();
    assert_eq!(output.organization_name, "Acme Corp");
    assert_eq!(output.expires_in, 3600);

    let claims = auth.validate_token(&output.access_token).unwrap().0;
    assert_eq!(claims.admin_email, "a@x.com");
    assert_eq!(claims.organization_name, "Acme Corp");
    assert_eq!(claims.role, ROLE_ADMIN);
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let directory = setup().await;
    seed_org(&directory, "Acme Corp", "a@x.com", "secret1").await;
    let auth = AuthService::new(directory, test_config());

    let err = auth.login("a@x.com", "wrong").await.unwrap_err();
    assert!(matches!(err, OrgDirError::Unauthorized));
}

#[tokio::test]
async fn unknown_email_is_indistinguishable_from_wrong_password() {
    let directory = setup().await;
    seed_org(&directory, "Acme Corp", "a@x.com", "secret1").await;
    let auth = AuthService::new(directory, test_config());

    let unknown = auth.login("nobody@x.com", "secret1").await.unwrap_err();
    let wrong = auth.login("a@x.com", "wrong").await.unwrap_err();

    // Same variant, same message — no leak about which part failed.
    assert!(matches!(unknown, OrgDirError::Unauthorized));
    assert!(matches!(wrong, OrgDirError::Unauthorized));
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let directory = setup().await;
    let auth = AuthService::new(directory, test_config());

    let err = auth.validate_token("not.a.token").unwrap_err();
    assert!(matches!(err, OrgDirError::Unauthorized));
}

#[tokio::test]
async fn token_stays_valid_after_rename_until_expiry() {
    let directory = setup().await;
    seed_org(&directory, "Acme Corp", "a@x.com", "secret1").await;

    let auth = AuthService::new(directory.clone(), test_config());
    let output = auth.login("a@x.com", "secret1").await.unwrap();

    directory
        .update(
            "Acme Corp",
            UpdateOrganizationRecord {
                organization_name: Some("New Acme".into()),
                partition_id: Some("org_new_acme".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Validation is stateless: the stale claim still verifies.
    let claims = auth.validate_token(&output.access_token).unwrap().0;
    assert_eq!(claims.organization_name, "Acme Corp");
}
