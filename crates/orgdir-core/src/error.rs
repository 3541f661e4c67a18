//! Error types for the ORGDIR system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrgDirError {
    #[error("Organization not found: {name}")]
    NotFound { name: String },

    #[error("Organization already exists: {name}")]
    AlreadyExists { name: String },

    #[error("Requester is not the organization admin")]
    Forbidden,

    #[error("Invalid credentials or token")]
    Unauthorized,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type OrgDirResult<T> = Result<T, OrgDirError>;
