//! Organization lifecycle orchestration — create, rename-with-migration,
//! and delete, composed from the tenant directory and partition store.

use orgdir_auth::config::AuthConfig;
use orgdir_auth::password;
use orgdir_core::error::{OrgDirError, OrgDirResult};
use orgdir_core::models::{
    AdminIdentity, NewOrganizationRecord, OrganizationRecord, UpdateOrganizationRecord,
};
use orgdir_core::naming;
use orgdir_core::repository::{PartitionStore, TenantDirectory};
use tracing::info;

/// Optional changes applied by [`OrgService::update`]; `None` fields
/// are left untouched.
#[derive(Debug, Default)]
pub struct UpdateOrganizationInput {
    pub new_organization_name: Option<String>,
    pub new_email: Option<String>,
    pub new_password: Option<String>,
}

/// Organization lifecycle manager.
///
/// Generic over the directory and partition store implementations so
/// the orchestration has no dependency on the storage crate.
///
/// Concurrent rename and delete on the same organization are not
/// mutually exclusive; both may partially apply. Uniqueness under
/// concurrent creates is delegated to the directory's storage-level
/// constraint, not enforced here.
pub struct OrgService<D: TenantDirectory, P: PartitionStore> {
    directory: D,
    partitions: P,
    config: AuthConfig,
}

impl<D: TenantDirectory, P: PartitionStore> OrgService<D, P> {
    pub fn new(directory: D, partitions: P, config: AuthConfig) -> Self {
        Self {
            directory,
            partitions,
            config,
        }
    }

    fn hash_password(&self, password: &str) -> OrgDirResult<String> {
        password::hash_password(password, self.config.pepper.as_deref())
            .map_err(|e| OrgDirError::Crypto(e.to_string()))
    }

    /// Create an organization together with its empty data partition.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> OrgDirResult<OrganizationRecord> {
        if name.trim().is_empty() {
            return Err(OrgDirError::Validation {
                message: "organization name must not be empty".into(),
            });
        }

        // 1. Cheap pre-check; the storage unique index is what actually
        //    decides a race.
        if self.directory.find_by_name(name).await?.is_some() {
            return Err(OrgDirError::AlreadyExists {
                name: name.to_string(),
            });
        }

        // 2. Partition first. If the directory insert below loses a
        //    concurrent race, the empty partition is orphaned; it is
        //    unreachable without a directory entry and is left for an
        //    out-of-band sweep.
        let partition_id = naming::partition_id(name);
        self.partitions.create(&partition_id).await?;

        // 3/4. Hash the password and insert the record.
        let password_hash = self.hash_password(password)?;
        let record = self
            .directory
            .insert(NewOrganizationRecord {
                organization_name: name.to_string(),
                partition_id,
                admin: AdminIdentity {
                    email: email.to_string(),
                    password_hash,
                },
            })
            .await?;

        info!(
            organization = %record.organization_name,
            partition = %record.partition_id,
            "Created organization"
        );
        Ok(record)
    }

    /// Look up an organization by name.
    pub async fn get(&self, name: &str) -> OrgDirResult<OrganizationRecord> {
        self.directory
            .find_by_name(name)
            .await?
            .ok_or_else(|| OrgDirError::NotFound {
                name: name.to_string(),
            })
    }

    /// Update an organization: admin email, admin password, and/or a
    /// rename with partition migration. Only the current admin may
    /// perform this.
    pub async fn update(
        &self,
        name: &str,
        requester_email: &str,
        input: UpdateOrganizationInput,
    ) -> OrgDirResult<OrganizationRecord> {
        // 1/2. Lookup and ownership check.
        let record = self.get(name).await?;
        if record.admin.email != requester_email {
            return Err(OrgDirError::Forbidden);
        }

        let mut staged = UpdateOrganizationRecord::default();

        // 3. Rename: migrate the partition before touching the
        //    directory.
        if let Some(new_name) = input
            .new_organization_name
            .as_deref()
            .filter(|n| *n != name)
        {
            if new_name.trim().is_empty() {
                return Err(OrgDirError::Validation {
                    message: "organization name must not be empty".into(),
                });
            }
            if self.directory.find_by_name(new_name).await?.is_some() {
                return Err(OrgDirError::AlreadyExists {
                    name: new_name.to_string(),
                });
            }

            let new_partition_id = naming::partition_id(new_name);

            // Distinct names can normalize to the same partition id
            // (e.g. "Acme Corp" -> "Acme-Corp"). The data already
            // lives in the target partition; a self-copy followed by
            // the drop below would destroy it, so only the name moves.
            if new_partition_id != record.partition_id {
                // The old partition stays intact until the copy
                // completes: a copy failure leaves directory and
                // source unchanged and the rename can simply be
                // retried. Between the drop below and the directory
                // update the directory still points at the dropped
                // partition — that window is an accepted non-atomicity
                // of this rename.
                self.partitions
                    .copy_all(&record.partition_id, &new_partition_id)
                    .await?;
                self.partitions.drop_partition(&record.partition_id).await?;

                staged.partition_id = Some(new_partition_id);
            }

            staged.organization_name = Some(new_name.to_string());

            info!(
                from = %name,
                to = %new_name,
                "Renamed organization"
            );
        }

        // 4. Stage credential changes.
        if let Some(email) = input.new_email {
            staged.admin_email = Some(email);
        }
        if let Some(pw) = input.new_password {
            staged.admin_password_hash = Some(self.hash_password(&pw)?);
        }

        if staged.is_empty() {
            return Ok(record);
        }

        // 5/6. Apply keyed by the original name; the directory returns
        //      the record re-fetched under its post-update name.
        self.directory.update(name, staged).await
    }

    /// Delete an organization and its partition. Only the current
    /// admin may perform this.
    ///
    /// The partition is dropped before the directory entry is removed:
    /// a crash in between leaves a detectable dangling record rather
    /// than an unreachable leaked partition.
    pub async fn delete(&self, name: &str, requester_email: &str) -> OrgDirResult<()> {
        let record = self.get(name).await?;
        if record.admin.email != requester_email {
            return Err(OrgDirError::Forbidden);
        }

        self.partitions.drop_partition(&record.partition_id).await?;
        self.directory.remove(name).await?;

        info!(organization = %name, "Deleted organization");
        Ok(())
    }
}
