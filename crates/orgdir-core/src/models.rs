//! Organization directory domain models.
//!
//! One directory record exists per organization. Each record owns
//! exactly one admin identity and references exactly one data
//! partition, addressed by a `partition_id` derived from the
//! organization name (see [`crate::naming`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single administrator identity bound to an organization.
///
/// `email` is the ownership key: every mutation of the organization is
/// authorized against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub email: String,
    /// Argon2id hash in PHC string format. Never the plaintext.
    pub password_hash: String,
}

/// An organization's authoritative directory record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub id: Uuid,
    /// Human-readable name, globally unique, mutable only via rename.
    pub organization_name: String,
    /// Storage-safe partition identifier (e.g., `org_acme_corp`),
    /// globally unique, rewritten on rename.
    pub partition_id: String,
    pub admin: AdminIdentity,
    /// Set once at creation, immutable thereafter.
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a new directory record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrganizationRecord {
    pub organization_name: String,
    pub partition_id: String,
    pub admin: AdminIdentity,
}

/// Partial-merge update applied to an existing record; `None` fields
/// are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateOrganizationRecord {
    pub organization_name: Option<String>,
    pub partition_id: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password_hash: Option<String>,
}

impl UpdateOrganizationRecord {
    /// True when no field is staged, i.e. applying this update would
    /// change nothing.
    pub fn is_empty(&self) -> bool {
        self.organization_name.is_none()
            && self.partition_id.is_none()
            && self.admin_email.is_none()
            && self.admin_password_hash.is_none()
    }
}

/// A single record inside a data partition.
///
/// Partitions are opaque containers: `data` is arbitrary JSON that the
/// directory never interprets. `record_id` is the storage identity used
/// for collision detection during partition migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionDocument {
    pub record_id: String,
    pub data: serde_json::Value,
}
