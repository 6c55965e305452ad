//! Handlers for the `/tecnico` resource (field technicians).
//!
//! A technician acts only on reports assigned to them.

use axum::extract::{Path, State};
use axum::Json;
use cocode_core::error::CoreError;
use cocode_core::report_status::ReportStatus;
use cocode_core::tracking::{optional_comment, validate_comment, validate_hours, TrackingKind};
use cocode_core::types::DbId;
use cocode_db::models::report::{Report, ReportScope};
use cocode_db::models::tracking::{NewTrackingEntry, TrackingEntry};
use cocode_db::repositories::{EvidenceRepo, ReportRepo, TrackingRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::handlers::reports::{with_evidence, ReportDetail, ReportWithEvidence};
use crate::middleware::rbac::RequireTechnician;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::{self, TransitionRequest};

/// Request body for `PUT /tecnico/reportes/{id}/estado`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Status code (`en_proceso`) or label (`En Proceso`).
    #[serde(default)]
    pub nuevo_estado: String,
    #[serde(alias = "comment")]
    pub comentario: Option<String>,
}

/// Request body for `POST /tecnico/reportes/{id}/seguimiento`.
#[derive(Debug, Deserialize)]
pub struct FollowUpRequest {
    #[serde(default, alias = "comment")]
    pub comentario: String,
    pub tiempo_invertido_horas: Option<f64>,
    pub accion_tomada: Option<String>,
}

/// GET /api/tecnico/reportes
///
/// Reports assigned to the caller within their department, with photos.
pub async fn list_reports(
    RequireTechnician(tech): RequireTechnician,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ReportWithEvidence>>>> {
    let reports = ReportRepo::list_for_technician(&state.pool, tech.id, tech.department_id).await?;
    let data = with_evidence(&state.pool, reports).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/tecnico/reportes/{id}/detalle
pub async fn report_detail(
    RequireTechnician(tech): RequireTechnician,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReportDetail>>> {
    let report = ReportRepo::find_in_scope(&state.pool, id, ReportScope::AssignedTo(tech.id))
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Report",
            id,
        })?;

    let fotos = EvidenceRepo::list_for_report(&state.pool, report.id).await?;
    let historial = TrackingRepo::list_for_report(&state.pool, report.id).await?;

    Ok(Json(DataResponse {
        data: ReportDetail {
            report,
            fotos,
            historial,
        },
    }))
}

/// PUT /api/tecnico/reportes/{id}/estado
pub async fn update_status(
    RequireTechnician(tech): RequireTechnician,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<Report>>> {
    if input.nuevo_estado.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "nuevo_estado is required".into(),
        )));
    }
    let target: ReportStatus = input.nuevo_estado.parse()?;
    let comment = optional_comment(input.comentario.as_deref())?;

    let outcome = workflow::apply_transition(
        &state.pool,
        TransitionRequest::new(id, tech.actor(), ReportScope::AssignedTo(tech.id), target)
            .with_comment(comment),
    )
    .await?;

    Ok(Json(DataResponse {
        data: outcome.report,
    }))
}

/// POST /api/tecnico/reportes/{id}/seguimiento
///
/// Log work on a report without changing its status.
pub async fn add_follow_up(
    RequireTechnician(tech): RequireTechnician,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<FollowUpRequest>,
) -> AppResult<Json<DataResponse<TrackingEntry>>> {
    let comment = validate_comment(&input.comentario, 1)?;
    if let Some(hours) = input.tiempo_invertido_horas {
        validate_hours(hours)?;
    }
    let action_taken = optional_comment(input.accion_tomada.as_deref())?;

    let entry = NewTrackingEntry {
        action_taken,
        hours_spent: input.tiempo_invertido_horas,
        ..NewTrackingEntry::comment(id, tech.actor(), TrackingKind::Actualizacion, comment)
    };
    let saved = workflow::record_note(&state.pool, ReportScope::AssignedTo(tech.id), entry).await?;

    Ok(Json(DataResponse { data: saved }))
}

/// GET /api/tecnico/reportes/{id}/historial
///
/// Unassigned reports answer 403 here rather than 404.
pub async fn report_history(
    RequireTechnician(tech): RequireTechnician,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TrackingEntry>>>> {
    ReportRepo::find_in_scope(&state.pool, id, ReportScope::AssignedTo(tech.id))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "You do not have access to this report's history".into(),
            ))
        })?;

    let history = TrackingRepo::list_for_report(&state.pool, id).await?;
    Ok(Json(DataResponse { data: history }))
}
