//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching the (joined) database row
//! - Insert DTOs where the service writes the table

pub mod account;
pub mod evidence;
pub mod problem_type;
pub mod report;
pub mod status;
pub mod tracking;
