//! ORGDIR Core — domain models, error taxonomy, partition naming, and
//! the repository traits implemented by the storage layer.

pub mod error;
pub mod models;
pub mod naming;
pub mod repository;

pub use error::{OrgDirError, OrgDirResult};
pub use models::{
    AdminIdentity, NewOrganizationRecord, OrganizationRecord, PartitionDocument,
    UpdateOrganizationRecord,
};
pub use repository::{PartitionStore, TenantDirectory};
