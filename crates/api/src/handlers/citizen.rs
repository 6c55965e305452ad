//! Handlers for the `/ciudadano` resource (citizen reports).
//!
//! A citizen only ever sees reports they created; any other id is a 404.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cocode_core::error::CoreError;
use cocode_core::tracking::{validate_comment, TrackingKind, MIN_CITIZEN_COMMENT_LENGTH};
use cocode_core::types::DbId;
use cocode_db::models::report::{Report, ReportCreator, ReportListParams, ReportScope};
use cocode_db::models::tracking::{NewTrackingEntry, TrackingEntry};
use cocode_db::repositories::{EvidenceRepo, ReportRepo, TrackingRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::handlers::reports::{list_filter, CreateReportRequest, CreatedReport, ReportDetail};
use crate::middleware::rbac::RequireCitizen;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow;

/// Request body for `POST /ciudadano/reportes/{id}/comentario`.
#[derive(Debug, Deserialize)]
pub struct CitizenCommentRequest {
    #[serde(default, alias = "comment")]
    pub comentario: String,
}

/// Report counts for the citizen's dashboard.
#[derive(Debug, Serialize)]
pub struct CitizenStats {
    pub total: i64,
    /// Count per status code; codes with no reports are absent.
    pub por_estado: BTreeMap<String, i64>,
}

/// Response of `GET /ciudadano/reportes`.
#[derive(Debug, Serialize)]
pub struct CitizenReportList {
    pub data: Vec<Report>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub estadisticas: CitizenStats,
}

/// POST /api/ciudadano/reportes
///
/// Create a report in the citizen's own zone. Returns 201 with the report
/// and a summary of how it was located.
pub async fn create_report(
    RequireCitizen(citizen): RequireCitizen,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedReport>>)> {
    let new_report = input
        .into_new_report(
            &state.pool,
            ReportCreator::Citizen(citizen.id),
            citizen.zone_id,
        )
        .await?;

    let (report, _) = workflow::create_report(&state.pool, &new_report, citizen.actor()).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedReport::new(report, &new_report),
        }),
    ))
}

/// GET /api/ciudadano/reportes
///
/// The citizen's reports, newest first, with per-status counts over all
/// of them.
pub async fn list_reports(
    RequireCitizen(citizen): RequireCitizen,
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<CitizenReportList>> {
    let scope = ReportScope::Citizen(citizen.id);
    let (mut filter, page) = list_filter(&params)?;
    filter.zone_id = None;

    let reports = ReportRepo::list_in_scope(&state.pool, scope, &filter).await?;
    let total = ReportRepo::count_in_scope(&state.pool, scope, &filter).await?;

    let counts = ReportRepo::status_counts(&state.pool, scope).await?;
    let estadisticas = CitizenStats {
        total: counts.iter().map(|c| c.total).sum(),
        por_estado: counts.into_iter().map(|c| (c.codigo, c.total)).collect(),
    };

    Ok(Json(CitizenReportList {
        data: reports,
        total,
        page: page.page,
        limit: page.limit,
        estadisticas,
    }))
}

/// GET /api/ciudadano/reportes/{id}
pub async fn get_report(
    RequireCitizen(citizen): RequireCitizen,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReportDetail>>> {
    let report = ReportRepo::find_in_scope(&state.pool, id, ReportScope::Citizen(citizen.id))
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

/// POST /api/ciudadano/reportes/{id}/comentario
pub async fn add_comment(
    RequireCitizen(citizen): RequireCitizen,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<CitizenCommentRequest>,
) -> AppResult<Json<DataResponse<TrackingEntry>>> {
    let comment = validate_comment(&input.comentario, MIN_CITIZEN_COMMENT_LENGTH)?;

    let entry = workflow::record_note(
        &state.pool,
        ReportScope::Citizen(citizen.id),
        NewTrackingEntry::comment(id, citizen.actor(), TrackingKind::Comentario, comment),
    )
    .await?;

    Ok(Json(DataResponse { data: entry }))
}
