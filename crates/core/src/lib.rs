//! Domain rules for the COCODE civic report platform.
//!
//! Everything in this crate is pure: no database, no HTTP. The DB and API
//! layers call into these modules to validate input and to decide which
//! report status transitions are legal for which role.

pub mod error;
pub mod report;
pub mod report_status;
pub mod roles;
pub mod search;
pub mod tracking;
pub mod types;
pub mod workflow;
