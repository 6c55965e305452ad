//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller's identity from a JWT Bearer token.
//! - [`rbac::RequireCitizen`], [`rbac::RequireLeader`],
//!   [`rbac::RequireTechnician`], [`rbac::RequireAdmin`] -- Require one role
//!   and load the caller's current scope from the database.

pub mod auth;
pub mod rbac;
