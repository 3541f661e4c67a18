//! SurrealDB implementation of [`TenantDirectory`].

use chrono::{DateTime, Utc};
use orgdir_core::error::{OrgDirError, OrgDirResult};
use orgdir_core::models::{
    AdminIdentity, NewOrganizationRecord, OrganizationRecord, UpdateOrganizationRecord,
};
use orgdir_core::repository::TenantDirectory;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// Nested admin object as stored on the `organization` table.
#[derive(Debug, SurrealValue)]
struct AdminRow {
    email: String,
    password_hash: String,
}

/// DB-side row struct for statements where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct OrganizationRow {
    organization_name: String,
    partition_id: String,
    admin: AdminRow,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct OrganizationRowWithId {
    record_id: String,
    organization_name: String,
    partition_id: String,
    admin: AdminRow,
    created_at: DateTime<Utc>,
}

impl OrganizationRowWithId {
    fn try_into_record(self) -> Result<OrganizationRecord, OrgDirError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| OrgDirError::Storage(format!("invalid record UUID: {e}")))?;
        Ok(OrganizationRecord {
            id,
            organization_name: self.organization_name,
            partition_id: self.partition_id,
            admin: AdminIdentity {
                email: self.admin.email,
                password_hash: self.admin.password_hash,
            },
            created_at: self.created_at,
        })
    }
}

/// Unique-index violations surface as statement errors; the message is
/// the only discriminator SurrealDB exposes.
fn is_uniqueness_violation(err: &surrealdb::Error) -> bool {
    let msg = err.to_string();
    msg.contains("already contains") || msg.contains("already exists")
}

/// SurrealDB implementation of the tenant directory.
#[derive(Clone)]
pub struct SurrealTenantDirectory<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTenantDirectory<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn find_one(
        &self,
        condition: &str,
        bind_key: &'static str,
        bind_value: String,
    ) -> OrgDirResult<Option<OrganizationRecord>> {
        let query = format!(
            "SELECT meta::id(id) AS record_id, * \
             FROM organization WHERE {condition}"
        );

        let mut result = self
            .db
            .query(&query)
            .bind((bind_key, bind_value))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter().next().map(|r| r.try_into_record()).transpose()
    }
}

impl<C: Connection> TenantDirectory for SurrealTenantDirectory<C> {
    async fn find_by_name(&self, name: &str) -> OrgDirResult<Option<OrganizationRecord>> {
        self.find_one("organization_name = $name", "name", name.to_string())
            .await
    }

    async fn find_by_admin_email(&self, email: &str) -> OrgDirResult<Option<OrganizationRecord>> {
        self.find_one("admin.email = $email", "email", email.to_string())
            .await
    }

    async fn insert(&self, input: NewOrganizationRecord) -> OrgDirResult<OrganizationRecord> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let name = input.organization_name.clone();

        let result = self
            .db
            .query(
                "CREATE type::record('organization', $id) SET \
                 organization_name = $name, partition_id = $partition_id, \
                 admin = { email: $email, password_hash: $password_hash }",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.organization_name))
            .bind(("partition_id", input.partition_id))
            .bind(("email", input.admin.email))
            .bind(("password_hash", input.admin.password_hash))
            .await
            .map_err(DbError::from)?;

        // The unique indexes reject a lost race here atomically.
        let mut result = result.check().map_err(|e| {
            if is_uniqueness_violation(&e) {
                OrgDirError::AlreadyExists { name: name.clone() }
            } else {
                OrgDirError::from(DbError::Surreal(e))
            }
        })?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| OrgDirError::Internal(format!("inserted record {id_str} not returned")))?;

        Ok(OrganizationRecord {
            id,
            organization_name: row.organization_name,
            partition_id: row.partition_id,
            admin: AdminIdentity {
                email: row.admin.email,
                password_hash: row.admin.password_hash,
            },
            created_at: row.created_at,
        })
    }

    async fn update(
        &self,
        name: &str,
        input: UpdateOrganizationRecord,
    ) -> OrgDirResult<OrganizationRecord> {
        let mut sets = Vec::new();
        if input.organization_name.is_some() {
            sets.push("organization_name = $new_name");
        }
        if input.partition_id.is_some() {
            sets.push("partition_id = $new_partition_id");
        }
        if input.admin_email.is_some() {
            sets.push("admin.email = $admin_email");
        }
        if input.admin_password_hash.is_some() {
            sets.push("admin.password_hash = $admin_password_hash");
        }
        if sets.is_empty() {
            return self
                .find_by_name(name)
                .await?
                .ok_or_else(|| OrgDirError::NotFound { name: name.to_string() });
        }

        // The record stays keyed by the original name for the whole
        // statement; the re-fetch below uses the post-update name.
        let target_name = input
            .organization_name
            .clone()
            .unwrap_or_else(|| name.to_string());

        let query = format!(
            "UPDATE organization SET {} WHERE organization_name = $name",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("name", name.to_string()));

        if let Some(new_name) = input.organization_name {
            builder = builder.bind(("new_name", new_name));
        }
        if let Some(partition_id) = input.partition_id {
            builder = builder.bind(("new_partition_id", partition_id));
        }
        if let Some(email) = input.admin_email {
            builder = builder.bind(("admin_email", email));
        }
        if let Some(password_hash) = input.admin_password_hash {
            builder = builder.bind(("admin_password_hash", password_hash));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| {
            if is_uniqueness_violation(&e) {
                OrgDirError::AlreadyExists {
                    name: target_name.clone(),
                }
            } else {
                OrgDirError::from(DbError::Surreal(e))
            }
        })?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(OrgDirError::NotFound {
                name: name.to_string(),
            });
        }

        // A record that vanished after a successful update is a broken
        // invariant, not a user-visible NotFound.
        self.find_by_name(&target_name).await?.ok_or_else(|| {
            OrgDirError::Internal(format!(
                "organization '{target_name}' missing after successful update"
            ))
        })
    }

    async fn remove(&self, name: &str) -> OrgDirResult<()> {
        let mut result = self
            .db
            .query("DELETE organization WHERE organization_name = $name RETURN BEFORE")
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(OrgDirError::NotFound {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
