use crate::report_status::ReportStatus;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The requested status change is not in the caller's transition table.
    #[error(
        "Cannot move report from '{}' to '{}'. Allowed next states: {}",
        from.label(),
        to.label(),
        ReportStatus::join_labels(allowed)
    )]
    InvalidTransition {
        from: ReportStatus,
        to: ReportStatus,
        allowed: Vec<ReportStatus>,
    },

    /// Reference data the workflow depends on is missing or unreadable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
