//! Audit trail (`seguimiento_reportes`) vocabulary and validation.
//!
//! Entries are append-only. This module defines the entry tags, the acting
//! account, and the checks applied to free-text comments and time logs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// Minimum length of a citizen comment on their own report.
pub const MIN_CITIZEN_COMMENT_LENGTH: usize = 5;

/// Maximum length of any audit comment.
pub const MAX_COMMENT_LENGTH: usize = 5_000;

/// Upper bound for `tiempo_invertido_horas` on a single follow-up.
pub const MAX_HOURS_PER_ENTRY: f64 = 999.0;

/// Tag stored in `seguimiento_reportes.tipo_seguimiento`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingKind {
    Creacion,
    Comentario,
    AprobacionLider,
    RechazoLider,
    Asignacion,
    CambioEstado,
    Actualizacion,
    Resolucion,
    ValidacionResolucion,
    RechazoResolucion,
}

impl TrackingKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Creacion => "creacion",
            Self::Comentario => "comentario",
            Self::AprobacionLider => "aprobacion_lider",
            Self::RechazoLider => "rechazo_lider",
            Self::Asignacion => "asignacion",
            Self::CambioEstado => "cambio_estado",
            Self::Actualizacion => "actualizacion",
            Self::Resolucion => "resolucion",
            Self::ValidacionResolucion => "validacion_resolucion",
            Self::RechazoResolucion => "rechazo_resolucion",
        }
    }
}

/// The account that performed an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub role: Role,
    pub id: DbId,
}

impl Actor {
    pub fn new(role: Role, id: DbId) -> Self {
        Self { role, id }
    }
}

/// Trim a comment and check its length bounds.
///
/// Returns the trimmed text so callers store what was validated.
pub fn validate_comment(text: &str, min_length: usize) -> Result<String, CoreError> {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    if len < min_length.max(1) {
        return Err(CoreError::Validation(if min_length <= 1 {
            "Comment must not be empty".to_string()
        } else {
            format!("Comment must be at least {min_length} characters long")
        }));
    }
    if len > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters (got {len})"
        )));
    }
    Ok(trimmed.to_string())
}

/// Normalise an optional comment: blank becomes `None`.
pub fn optional_comment(text: Option<&str>) -> Result<Option<String>, CoreError> {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => validate_comment(t, 1).map(Some),
        None => Ok(None),
    }
}

/// Validate hours logged on a technician follow-up.
pub fn validate_hours(hours: f64) -> Result<(), CoreError> {
    if !hours.is_finite() || !(0.0..=MAX_HOURS_PER_ENTRY).contains(&hours) {
        return Err(CoreError::Validation(format!(
            "tiempo_invertido_horas must be between 0 and {MAX_HOURS_PER_ENTRY}"
        )));
    }
    Ok(())
}

/// Build the audit comment for a leader rejection.
///
/// The reason has no column of its own; it leads the comment text so
/// tooling that reads the trail can find it with a fixed prefix.
pub fn rejection_comment(reason: &str, comment: Option<&str>) -> Result<String, CoreError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(CoreError::Validation(
            "motivo_rechazo is required to reject a report".to_string(),
        ));
    }
    let mut text = format!("Motivo de rechazo: {reason}");
    if let Some(extra) = optional_comment(comment)? {
        text.push_str(". ");
        text.push_str(&extra);
    }
    validate_comment(&text, 1)
}
