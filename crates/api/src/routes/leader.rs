//! Route definitions for the `/lider` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::leader;
use crate::state::AppState;

/// Routes mounted at `/lider`.
///
/// ```text
/// GET  /reportes                      -> list_reports
/// POST /reportes                      -> create_report
/// GET  /reportes/pendientes           -> pending_reports
/// POST /reportes/{id}/aprobar         -> approve_report
/// POST /reportes/{id}/rechazar        -> reject_report
/// POST /reportes/{id}/validar         -> validate_resolution
/// GET  /reportes/{id}/historial       -> report_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/reportes",
            get(leader::list_reports).post(leader::create_report),
        )
        .route("/reportes/pendientes", get(leader::pending_reports))
        .route("/reportes/{id}/aprobar", post(leader::approve_report))
        .route("/reportes/{id}/rechazar", post(leader::reject_report))
        .route("/reportes/{id}/validar", post(leader::validate_resolution))
        .route("/reportes/{id}/historial", get(leader::report_history))
}
