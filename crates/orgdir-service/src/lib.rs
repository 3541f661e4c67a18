//! ORGDIR Service — the organization lifecycle manager.

pub mod org;

pub use org::{OrgService, UpdateOrganizationInput};
