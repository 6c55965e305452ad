//! Request handlers, one module per role prefix.
//!
//! Handlers validate input, delegate reads to the `cocode_db` repositories
//! and writes to [`crate::workflow`], and map errors via
//! [`AppError`](crate::error::AppError).

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod citizen;
pub mod leader;
pub mod reports;
pub mod technician;
