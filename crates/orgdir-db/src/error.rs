//! Database-specific error types and conversions.

use orgdir_core::error::OrgDirError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Invalid partition id: {0}")]
    InvalidPartitionId(String),
}

impl From<DbError> for OrgDirError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::InvalidPartitionId(id) => OrgDirError::Validation {
                message: format!("invalid partition id: {id}"),
            },
            other => OrgDirError::Storage(other.to_string()),
        }
    }
}
