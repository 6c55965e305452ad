//! Request and response types shared by the role-specific report handlers.

use std::collections::HashMap;

use cocode_core::error::CoreError;
use cocode_core::report::{
    require_text, validate_address, validate_location, LocationSummary, Priority,
};
use cocode_core::report_status::ReportStatus;
use cocode_core::search::{clamp_limit, clamp_page, page_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use cocode_core::types::DbId;
use cocode_db::models::evidence::EvidenceFile;
use cocode_db::models::report::{
    NewReport, Report, ReportCreator, ReportListFilter, ReportListParams,
};
use cocode_db::models::tracking::TrackingEntry;
use cocode_db::repositories::{EvidenceRepo, ProblemTypeRepo};
use cocode_db::DbPool;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Body of `POST /ciudadano/reportes` and `POST /lider/reportes`.
///
/// Text fields default to empty so a missing field is reported as a
/// validation error rather than a JSON shape error.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub titulo: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub descripcion: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub direccion: String,
    pub id_tipo_problema: Option<DbId>,
    pub prioridad: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub metodo_ubicacion: Option<String>,
    pub precision_metros: Option<f64>,
}

impl CreateReportRequest {
    /// Validate the body and resolve it into an insert DTO.
    ///
    /// The zone always comes from the creator's profile.
    pub async fn into_new_report(
        self,
        pool: &DbPool,
        creator: ReportCreator,
        zone_id: DbId,
    ) -> AppResult<NewReport> {
        self.validate()?;

        let titulo = require_text("titulo", &self.titulo)?;
        let descripcion = require_text("descripcion", &self.descripcion)?;
        let direccion = validate_address(&self.direccion)?;
        let id_tipo_problema = self
            .id_tipo_problema
            .ok_or_else(|| CoreError::Validation("id_tipo_problema is required".into()))?;
        let prioridad = Priority::parse_optional(self.prioridad.as_deref())?;
        let location = validate_location(
            self.latitud,
            self.longitud,
            self.metodo_ubicacion.as_deref(),
            self.precision_metros,
        )?;

        ProblemTypeRepo::find_active(pool, id_tipo_problema)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "Problem type {id_tipo_problema} does not exist or is inactive"
                )))
            })?;

        Ok(NewReport {
            titulo,
            descripcion,
            direccion,
            location,
            prioridad,
            creator,
            id_tipo_problema,
            id_zona: zone_id,
        })
    }
}

/// Response of a successful creation.
#[derive(Debug, Serialize)]
pub struct CreatedReport {
    pub reporte: Report,
    pub ubicacion: LocationSummary,
}

impl CreatedReport {
    pub fn new(report: Report, input: &NewReport) -> Self {
        Self {
            ubicacion: LocationSummary::new(input.location.as_ref(), &report.direccion),
            reporte: report,
        }
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// A report with its evidence photos.
#[derive(Debug, Serialize)]
pub struct ReportWithEvidence {
    #[serde(flatten)]
    pub report: Report,
    pub fotos: Vec<EvidenceFile>,
}

/// A report with photos and its full audit trail.
#[derive(Debug, Serialize)]
pub struct ReportDetail {
    #[serde(flatten)]
    pub report: Report,
    pub fotos: Vec<EvidenceFile>,
    pub historial: Vec<TrackingEntry>,
}

/// Attach evidence photos to each report with a single query.
pub async fn with_evidence(
    pool: &DbPool,
    reports: Vec<Report>,
) -> AppResult<Vec<ReportWithEvidence>> {
    let ids: Vec<DbId> = reports.iter().map(|r| r.id).collect();
    let mut by_report: HashMap<DbId, Vec<EvidenceFile>> = HashMap::new();
    for file in EvidenceRepo::list_for_reports(pool, &ids).await? {
        by_report.entry(file.id_reporte).or_default().push(file);
    }

    Ok(reports
        .into_iter()
        .map(|report| ReportWithEvidence {
            fotos: by_report.remove(&report.id).unwrap_or_default(),
            report,
        })
        .collect())
}

/// Body of a status-changing call that only carries an optional comment.
#[derive(Debug, Default, Deserialize)]
pub struct CommentBody {
    #[serde(alias = "comment")]
    pub comentario: Option<String>,
}

/// Resolved pagination for a list request.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

/// Turn `?estado=&zona=&page=&limit=` into a list filter.
///
/// `estado` accepts a status code or label; anything else is a 400.
pub fn list_filter(params: &ReportListParams) -> AppResult<(ReportListFilter, Page)> {
    let status = params
        .estado
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<ReportStatus>)
        .transpose()?;

    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);

    Ok((
        ReportListFilter {
            status,
            zone_id: params.zona,
            limit,
            offset: page_offset(page, limit),
        },
        Page { page, limit },
    ))
}
