//! Handlers for the `/lider` resource (community leader review).
//!
//! Every call is scoped to the leader's zone as stored right now; reports
//! from other zones answer 404.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cocode_core::error::CoreError;
use cocode_core::report_status::ReportStatus;
use cocode_core::tracking::{optional_comment, rejection_comment};
use cocode_core::types::DbId;
use cocode_core::workflow::closure_target;
use cocode_db::models::report::{
    Report, ReportCreator, ReportListParams, ReportScope, StatusUpdateExtras,
};
use cocode_db::models::tracking::TrackingEntry;
use cocode_db::repositories::{ReportRepo, TrackingRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::handlers::reports::{list_filter, CommentBody, CreateReportRequest, CreatedReport};
use crate::middleware::rbac::{LeaderContext, RequireLeader};
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;
use crate::workflow::{self, TransitionRequest};

/// Request body for `POST /lider/reportes/{id}/rechazar`.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub motivo_rechazo: String,
    #[serde(alias = "comment")]
    pub comentario: Option<String>,
}

/// Request body for `POST /lider/reportes/{id}/validar`.
#[derive(Debug, Deserialize)]
pub struct ValidateResolutionRequest {
    pub aprobado: bool,
    #[serde(alias = "comment")]
    pub comentario: Option<String>,
}

fn zone_transition(leader: &LeaderContext, id: DbId, target: ReportStatus) -> TransitionRequest {
    TransitionRequest::new(id, leader.actor(), ReportScope::Zone(leader.zone_id), target)
}

fn coordinated_by(leader: &LeaderContext) -> StatusUpdateExtras {
    StatusUpdateExtras {
        leader_coordinator: Some(leader.id),
        ..Default::default()
    }
}

/// GET /api/lider/reportes/pendientes
///
/// Reports in the leader's zone waiting for review (`Nuevo`).
pub async fn pending_reports(
    RequireLeader(leader): RequireLeader,
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<PaginatedResponse<Report>>> {
    let scope = ReportScope::Zone(leader.zone_id);
    let (mut filter, page) = list_filter(&params)?;
    filter.status = Some(ReportStatus::Nuevo);
    filter.zone_id = None;

    let data = ReportRepo::list_in_scope(&state.pool, scope, &filter).await?;
    let total = ReportRepo::count_in_scope(&state.pool, scope, &filter).await?;

    Ok(Json(PaginatedResponse {
        data,
        total,
        page: page.page,
        limit: page.limit,
    }))
}

/// GET /api/lider/reportes
///
/// All reports in the leader's zone, optionally filtered by `estado`.
pub async fn list_reports(
    RequireLeader(leader): RequireLeader,
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<PaginatedResponse<Report>>> {
    let scope = ReportScope::Zone(leader.zone_id);
    let (mut filter, page) = list_filter(&params)?;
    filter.zone_id = None;

    let data = ReportRepo::list_in_scope(&state.pool, scope, &filter).await?;
    let total = ReportRepo::count_in_scope(&state.pool, scope, &filter).await?;

    Ok(Json(PaginatedResponse {
        data,
        total,
        page: page.page,
        limit: page.limit,
    }))
}

/// POST /api/lider/reportes
///
/// Create a report on behalf of the community, in the leader's zone.
pub async fn create_report(
    RequireLeader(leader): RequireLeader,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedReport>>)> {
    let new_report = input
        .into_new_report(&state.pool, ReportCreator::Leader(leader.id), leader.zone_id)
        .await?;

    let (report, _) = workflow::create_report(&state.pool, &new_report, leader.actor()).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedReport::new(report, &new_report),
        }),
    ))
}

/// POST /api/lider/reportes/{id}/aprobar
///
/// The body is optional; without one the default audit comment is used.
pub async fn approve_report(
    RequireLeader(leader): RequireLeader,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<JsonBody<CommentBody>>,
) -> AppResult<Json<DataResponse<Report>>> {
    let input = body.map(|JsonBody(b)| b).unwrap_or_default();
    let comment = optional_comment(input.comentario.as_deref())?;

    let outcome = workflow::apply_transition(
        &state.pool,
        zone_transition(&leader, id, ReportStatus::AprobadoLider)
            .with_comment(comment)
            .with_extras(coordinated_by(&leader)),
    )
    .await?;

    Ok(Json(DataResponse {
        data: outcome.report,
    }))
}

/// POST /api/lider/reportes/{id}/rechazar
///
/// The reason is required and leads the audit comment.
pub async fn reject_report(
    RequireLeader(leader): RequireLeader,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<RejectRequest>,
) -> AppResult<Json<DataResponse<Report>>> {
    let comment = rejection_comment(&input.motivo_rechazo, input.comentario.as_deref())?;

    let outcome = workflow::apply_transition(
        &state.pool,
        zone_transition(&leader, id, ReportStatus::RechazadoLider)
            .with_comment(Some(comment))
            .with_extras(coordinated_by(&leader)),
    )
    .await?;

    Ok(Json(DataResponse {
        data: outcome.report,
    }))
}

/// POST /api/lider/reportes/{id}/validar
///
/// Accept (`Cerrado`) or send back (`Reabierto`) a resolved report.
pub async fn validate_resolution(
    RequireLeader(leader): RequireLeader,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<ValidateResolutionRequest>,
) -> AppResult<Json<DataResponse<Report>>> {
    let comment = optional_comment(input.comentario.as_deref())?;
    let target = closure_target(input.aprobado);

    let outcome = workflow::apply_transition(
        &state.pool,
        zone_transition(&leader, id, target).with_comment(comment),
    )
    .await?;

    Ok(Json(DataResponse {
        data: outcome.report,
    }))
}

/// GET /api/lider/reportes/{id}/historial
pub async fn report_history(
    RequireLeader(leader): RequireLeader,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TrackingEntry>>>> {
    ReportRepo::find_in_scope(&state.pool, id, ReportScope::Zone(leader.zone_id))
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Report",
            id,
        })?;

    let history = TrackingRepo::list_for_report(&state.pool, id).await?;
    Ok(Json(DataResponse { data: history }))
}
