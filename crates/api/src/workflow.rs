//! Report workflow service.
//!
//! Every write that changes a report, or records something about it, goes
//! through this module. Status changes run as one transaction:
//!
//! 1. lock the report row inside the caller's scope (missing or out of
//!    scope is a 404),
//! 2. check the (role, current status) transition table,
//! 3. resolve the target status row by code,
//! 4. update the report with the target's timestamp effects,
//! 5. append the audit entry,
//! 6. commit.
//!
//! The row lock makes concurrent changes to the same report run one after
//! another, each against the status the previous one committed.

use cocode_core::error::CoreError;
use cocode_core::report_status::ReportStatus;
use cocode_core::tracking::{Actor, TrackingKind};
use cocode_core::types::DbId;
use cocode_core::workflow::{action_text_for, effects_of, tracking_kind_for, validate_transition};
use cocode_db::models::report::{NewReport, Report, ReportScope, StatusUpdateExtras};
use cocode_db::models::tracking::{NewTrackingEntry, TrackingEntry};
use cocode_db::repositories::{ReportRepo, StatusRepo, TrackingRepo};
use cocode_db::DbPool;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};

fn report_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Report",
        id,
    })
}

/// Resolve the row id of a status by its code, inside the current
/// transaction. A missing row means the vocabulary table is incomplete.
async fn status_id(conn: &mut PgConnection, status: ReportStatus) -> AppResult<DbId> {
    let row = StatusRepo::find_by_code(conn, status.code())
        .await?
        .ok_or_else(|| {
            CoreError::Configuration(format!(
                "Status '{}' ({}) is missing from estados_reporte",
                status.label(),
                status.code()
            ))
        })?;
    Ok(row.id)
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// A requested status change.
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    pub report_id: DbId,
    pub actor: Actor,
    /// Reports the actor may act on. Checked before the transition table.
    pub scope: ReportScope,
    pub target: ReportStatus,
    /// Audit comment. Defaults to "Estado cambiado de X a Y".
    pub comment: Option<String>,
    /// Audit `accion_tomada`. Defaults to the target's standard text.
    pub action_taken: Option<String>,
    pub hours_spent: Option<f64>,
    pub extras: StatusUpdateExtras,
}

impl TransitionRequest {
    pub fn new(report_id: DbId, actor: Actor, scope: ReportScope, target: ReportStatus) -> Self {
        Self {
            report_id,
            actor,
            scope,
            target,
            comment: None,
            action_taken: None,
            hours_spent: None,
            extras: StatusUpdateExtras::default(),
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_extras(mut self, extras: StatusUpdateExtras) -> Self {
        self.extras = extras;
        self
    }
}

/// Result of a committed transition.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub from: ReportStatus,
    pub report: Report,
    pub entry: TrackingEntry,
}

/// Apply a status change and its audit entry atomically.
pub async fn apply_transition(
    pool: &DbPool,
    request: TransitionRequest,
) -> AppResult<TransitionOutcome> {
    let mut tx = pool.begin().await?;

    let current = ReportRepo::lock_in_scope(&mut *tx, request.report_id, request.scope)
        .await?
        .ok_or_else(|| report_not_found(request.report_id))?;

    let from = current.status()?;
    validate_transition(request.actor.role, from, request.target)?;

    let target_id = status_id(&mut *tx, request.target).await?;

    let report = ReportRepo::update_status(
        &mut *tx,
        current.id,
        target_id,
        effects_of(request.target),
        request.extras,
    )
    .await?;

    let comment = request.comment.unwrap_or_else(|| {
        format!(
            "Estado cambiado de {} a {}",
            from.label(),
            request.target.label()
        )
    });
    let action_taken = request
        .action_taken
        .unwrap_or_else(|| action_text_for(request.target).to_string());

    let entry = TrackingRepo::insert(
        &mut *tx,
        &NewTrackingEntry {
            report_id: current.id,
            actor: request.actor,
            previous_status: Some(current.id_estado),
            new_status: Some(target_id),
            comment,
            kind: tracking_kind_for(request.target),
            action_taken: Some(action_taken),
            hours_spent: request.hours_spent,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        report_id = report.id,
        numero_reporte = %report.numero_reporte,
        from = from.code(),
        to = request.target.code(),
        actor_role = request.actor.role.as_str(),
        actor_id = request.actor.id,
        "Report status changed"
    );

    Ok(TransitionOutcome {
        from,
        report,
        entry,
    })
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Insert a report in `Nuevo` together with its `creacion` audit entry.
pub async fn create_report(
    pool: &DbPool,
    input: &NewReport,
    actor: Actor,
) -> AppResult<(Report, TrackingEntry)> {
    let mut tx = pool.begin().await?;

    let nuevo_id = status_id(&mut *tx, ReportStatus::Nuevo).await?;
    let report = ReportRepo::create(&mut *tx, input, nuevo_id).await?;

    let entry = TrackingRepo::insert(
        &mut *tx,
        &NewTrackingEntry {
            report_id: report.id,
            actor,
            previous_status: None,
            new_status: Some(nuevo_id),
            comment: format!("Reporte {} creado: {}", report.numero_reporte, report.titulo),
            kind: TrackingKind::Creacion,
            action_taken: Some(action_text_for(ReportStatus::Nuevo).to_string()),
            hours_spent: None,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        report_id = report.id,
        numero_reporte = %report.numero_reporte,
        zone_id = report.id_zona,
        creator = actor.role.as_str(),
        creator_id = actor.id,
        "Report created"
    );

    Ok((report, entry))
}

// ---------------------------------------------------------------------------
// Comments and follow-ups
// ---------------------------------------------------------------------------

/// Append an entry that does not change the status.
///
/// The report is locked inside `scope` for the insert, so a note is never
/// interleaved with a status change on the same report.
pub async fn record_note(
    pool: &DbPool,
    scope: ReportScope,
    entry: NewTrackingEntry,
) -> AppResult<TrackingEntry> {
    let mut tx = pool.begin().await?;

    ReportRepo::lock_in_scope(&mut *tx, entry.report_id, scope)
        .await?
        .ok_or_else(|| report_not_found(entry.report_id))?;

    let saved = TrackingRepo::insert(&mut *tx, &entry).await?;

    tx.commit().await?;

    tracing::info!(
        report_id = entry.report_id,
        kind = entry.kind.code(),
        actor_role = entry.actor.role.as_str(),
        actor_id = entry.actor.id,
        "Report note recorded"
    );

    Ok(saved)
}
