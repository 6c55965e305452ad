//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Read paths take `&PgPool`; methods that must run inside a caller's
//! transaction take `&mut PgConnection` (pass `&mut *tx`).

pub mod account_repo;
pub mod evidence_repo;
pub mod problem_type_repo;
pub mod report_repo;
pub mod status_repo;
pub mod tracking_repo;

pub use account_repo::{CitizenRepo, LeaderRepo, StaffRepo};
pub use evidence_repo::EvidenceRepo;
pub use problem_type_repo::ProblemTypeRepo;
pub use report_repo::ReportRepo;
pub use status_repo::StatusRepo;
pub use tracking_repo::TrackingRepo;
