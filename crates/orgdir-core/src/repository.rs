//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Uniqueness of
//! `organization_name` and `partition_id` is enforced by the storage
//! layer's atomic constraint check — implementations must not rely on
//! process-local locking, because the directory may be shared across
//! processes.

use serde_json::Value;

use crate::error::OrgDirResult;
use crate::models::{
    NewOrganizationRecord, OrganizationRecord, PartitionDocument, UpdateOrganizationRecord,
};

/// The authoritative record store: one entry per organization.
pub trait TenantDirectory: Send + Sync {
    /// Look up a record by organization name. No side effects.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = OrgDirResult<Option<OrganizationRecord>>> + Send;

    /// Look up the record whose admin owns the given email.
    ///
    /// Required by the authentication flow, which resolves an admin to
    /// their organization without knowing its name.
    fn find_by_admin_email(
        &self,
        email: &str,
    ) -> impl Future<Output = OrgDirResult<Option<OrganizationRecord>>> + Send;

    /// Insert a new record.
    ///
    /// Fails with `AlreadyExists` when another record holds the same
    /// `organization_name` or `partition_id`. Concurrent inserts with
    /// the same name must have exactly one succeed.
    fn insert(
        &self,
        input: NewOrganizationRecord,
    ) -> impl Future<Output = OrgDirResult<OrganizationRecord>> + Send;

    /// Apply a partial field merge to the record keyed by `name`.
    ///
    /// Returns the record re-fetched under its post-update name;
    /// `NotFound` when no record matches `name`, `Internal` when the
    /// record vanished after a successful update.
    fn update(
        &self,
        name: &str,
        input: UpdateOrganizationRecord,
    ) -> impl Future<Output = OrgDirResult<OrganizationRecord>> + Send;

    /// Remove the record keyed by `name`; `NotFound` when absent.
    fn remove(&self, name: &str) -> impl Future<Output = OrgDirResult<()>> + Send;
}

/// A keyed collection of opaque data partitions, one per organization.
///
/// The store never interprets partition contents.
pub trait PartitionStore: Send + Sync {
    /// Create an empty, addressable partition. Idempotent: creating an
    /// existing partition is not an error.
    fn create(&self, partition_id: &str) -> impl Future<Output = OrgDirResult<()>> + Send;

    /// Insert an opaque document into a partition.
    fn insert_document(
        &self,
        partition_id: &str,
        data: Value,
    ) -> impl Future<Output = OrgDirResult<PartitionDocument>> + Send;

    /// List the documents in a partition (internal bookkeeping records
    /// excluded).
    fn list_documents(
        &self,
        partition_id: &str,
    ) -> impl Future<Output = OrgDirResult<Vec<PartitionDocument>>> + Send;

    /// Copy every record in `src` into `dst`, returning the number of
    /// records copied.
    ///
    /// Collision policy: a record whose identity conflicts with an
    /// existing entry in `dst` is re-inserted under a fresh identity —
    /// data is preserved, the original identity is not. Best-effort
    /// migration, not a transactional move.
    fn copy_all(&self, src: &str, dst: &str) -> impl Future<Output = OrgDirResult<u64>> + Send;

    /// Irreversibly remove a partition and all its contents.
    fn drop_partition(&self, partition_id: &str) -> impl Future<Output = OrgDirResult<()>> + Send;

    /// Whether a partition currently holds any records.
    fn exists(&self, partition_id: &str) -> impl Future<Output = OrgDirResult<bool>> + Send;
}
