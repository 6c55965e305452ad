//! Report workflow: who may move a report from which status to which.
//!
//! A single table keyed by (role, current status) lists the legal next
//! statuses. Every endpoint that changes a report's status goes through
//! [`validate_transition`]; there are no per-handler copies of the rules.
//!
//! ```text
//! leader:        Nuevo               -> Aprobado por Líder | Rechazado por Líder
//!                Resuelto            -> Cerrado | Reabierto
//! technician:    Asignado            -> En Proceso
//!                En Proceso          -> Pendiente Materiales | Resuelto
//!                Pendiente Materiales-> En Proceso | Resuelto
//! administrator: Aprobado por Líder  -> Asignado
//!                Reabierto           -> Asignado
//! ```

use crate::error::CoreError;
use crate::report_status::ReportStatus;
use crate::roles::Role;
use crate::tracking::TrackingKind;

use ReportStatus::*;

/// Statuses `role` may move a report to when it is currently in `from`.
pub fn allowed_transitions(role: Role, from: ReportStatus) -> &'static [ReportStatus] {
    match (role, from) {
        (Role::Leader, Nuevo) => &[AprobadoLider, RechazadoLider],
        (Role::Leader, Resuelto) => &[Cerrado, Reabierto],

        // Asignado -> Resuelto is deliberately absent: work has to be
        // acknowledged as En Proceso first.
        (Role::Technician, Asignado) => &[EnProceso],
        (Role::Technician, EnProceso) => &[PendienteMateriales, Resuelto],
        (Role::Technician, PendienteMateriales) => &[EnProceso, Resuelto],

        (Role::Admin, AprobadoLider) => &[Asignado],
        (Role::Admin, Reabierto) => &[Asignado],

        _ => &[],
    }
}

/// Check that `role` may move a report from `from` to `to`.
pub fn validate_transition(
    role: Role,
    from: ReportStatus,
    to: ReportStatus,
) -> Result<(), CoreError> {
    let allowed = allowed_transitions(role, from);
    if allowed.contains(&to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            from,
            to,
            allowed: allowed.to_vec(),
        })
    }
}

/// What happens to `fecha_cierre` when a report enters a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureStamp {
    Keep,
    Set,
    Clear,
}

/// Timestamp columns touched when a report enters a status.
///
/// `fecha_modifica` is always refreshed and is not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEffects {
    pub stamp_assignment: bool,
    pub stamp_resolution: bool,
    pub closure: ClosureStamp,
}

/// Timestamp effects of entering `to`.
pub fn effects_of(to: ReportStatus) -> TransitionEffects {
    TransitionEffects {
        stamp_assignment: to == Asignado,
        stamp_resolution: to == Resuelto,
        closure: match to {
            Cerrado => ClosureStamp::Set,
            Reabierto => ClosureStamp::Clear,
            _ => ClosureStamp::Keep,
        },
    }
}

/// Audit-trail tag recorded for a transition into `to`.
pub fn tracking_kind_for(to: ReportStatus) -> TrackingKind {
    match to {
        AprobadoLider => TrackingKind::AprobacionLider,
        RechazadoLider => TrackingKind::RechazoLider,
        Asignado => TrackingKind::Asignacion,
        Resuelto => TrackingKind::Resolucion,
        Cerrado => TrackingKind::ValidacionResolucion,
        Reabierto => TrackingKind::RechazoResolucion,
        Nuevo | EnProceso | PendienteMateriales => TrackingKind::CambioEstado,
    }
}

/// Target of a leader's closure validation.
pub fn closure_target(approved: bool) -> ReportStatus {
    if approved {
        Cerrado
    } else {
        Reabierto
    }
}

/// Default `accion_tomada` text for a transition into `to`.
pub fn action_text_for(to: ReportStatus) -> &'static str {
    match to {
        AprobadoLider => "Reporte aprobado por el líder comunitario",
        RechazadoLider => "Reporte rechazado por el líder comunitario",
        Asignado => "Reporte asignado a técnico",
        EnProceso => "Trabajo en proceso",
        PendienteMateriales => "En espera de materiales",
        Resuelto => "Problema resuelto por el técnico",
        Cerrado => "Resolución validada y reporte cerrado",
        Reabierto => "Resolución rechazada, reporte reabierto",
        Nuevo => "Reporte creado",
    }
}
