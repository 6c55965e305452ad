//! Audit trail entry model and insert DTO (`seguimiento_reportes`).
//!
//! Entries are immutable once created (no update DTO, no `fecha_modifica`).

use cocode_core::tracking::{Actor, TrackingKind};
use cocode_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An audit entry joined with the codes and labels of its statuses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrackingEntry {
    pub id: DbId,
    pub id_reporte: DbId,
    pub tipo_usuario: String,
    pub id_usuario: DbId,
    pub estado_anterior: Option<DbId>,
    pub estado_anterior_codigo: Option<String>,
    pub estado_anterior_nombre: Option<String>,
    pub estado_nuevo: Option<DbId>,
    pub estado_nuevo_codigo: Option<String>,
    pub estado_nuevo_nombre: Option<String>,
    pub comentario: String,
    pub tipo_seguimiento: String,
    pub accion_tomada: Option<String>,
    pub tiempo_invertido_horas: Option<f64>,
    pub fecha_seguimiento: Timestamp,
}

/// DTO for appending an audit entry.
#[derive(Debug, Clone)]
pub struct NewTrackingEntry {
    pub report_id: DbId,
    pub actor: Actor,
    pub previous_status: Option<DbId>,
    pub new_status: Option<DbId>,
    pub comment: String,
    pub kind: TrackingKind,
    pub action_taken: Option<String>,
    pub hours_spent: Option<f64>,
}

impl NewTrackingEntry {
    /// An entry that only carries a comment.
    pub fn comment(report_id: DbId, actor: Actor, kind: TrackingKind, comment: String) -> Self {
        Self {
            report_id,
            actor,
            previous_status: None,
            new_status: None,
            comment,
            kind,
            action_taken: None,
            hours_spent: None,
        }
    }
}
