//! Handlers for the `/admin` resource (report oversight and assignment).

use axum::extract::{Path, Query, State};
use axum::Json;
use cocode_core::error::CoreError;
use cocode_core::report_status::ReportStatus;
use cocode_core::roles::ROLE_TECHNICIAN;
use cocode_core::tracking::optional_comment;
use cocode_core::types::DbId;
use cocode_db::models::report::{Report, ReportListParams, ReportScope, StatusUpdateExtras};
use cocode_db::repositories::{ReportRepo, StaffRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::handlers::reports::list_filter;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;
use crate::workflow::{self, TransitionRequest};

/// Request body for `PUT /admin/reportes/{id}/asignar`.
#[derive(Debug, Deserialize)]
pub struct AssignTechnicianRequest {
    pub id_tecnico: DbId,
    #[serde(alias = "comment")]
    pub comentario: Option<String>,
}

/// GET /api/admin/reportes
///
/// Every active report, filterable by `estado` and `zona`.
pub async fn list_reports(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<PaginatedResponse<Report>>> {
    let (filter, page) = list_filter(&params)?;

    let data = ReportRepo::list_in_scope(&state.pool, ReportScope::All, &filter).await?;
    let total = ReportRepo::count_in_scope(&state.pool, ReportScope::All, &filter).await?;

    Ok(Json(PaginatedResponse {
        data,
        total,
        page: page.page,
        limit: page.limit,
    }))
}

/// PUT /api/admin/reportes/{id}/asignar
///
/// Assign an approved (or reopened) report to an active technician of the
/// department responsible for its problem type.
pub async fn assign_technician(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<AssignTechnicianRequest>,
) -> AppResult<Json<DataResponse<Report>>> {
    let comment = optional_comment(input.comentario.as_deref())?;

    let report = ReportRepo::find_in_scope(&state.pool, id, ReportScope::All)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Report",
            id,
        })?;

    let technician = StaffRepo::find_by_id(&state.pool, input.id_tecnico)
        .await?
        .filter(|s| s.estado && s.rol == ROLE_TECHNICIAN)
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "{} is not an active technician",
                input.id_tecnico
            )))
        })?;

    if technician.id_departamento != Some(report.id_departamento) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Technician {} does not belong to the department responsible for '{}'",
            technician.id, report.tipo_problema_nombre
        ))));
    }

    let outcome = workflow::apply_transition(
        &state.pool,
        TransitionRequest::new(id, admin.actor(), ReportScope::All, ReportStatus::Asignado)
            .with_comment(Some(comment.unwrap_or_else(|| {
                format!("Reporte asignado a {}", technician.nombre)
            })))
            .with_extras(StatusUpdateExtras {
                assigned_technician: Some(technician.id),
                ..Default::default()
            }),
    )
    .await?;

    Ok(Json(DataResponse {
        data: outcome.report,
    }))
}
