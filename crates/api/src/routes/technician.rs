//! Route definitions for the `/tecnico` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::technician;
use crate::state::AppState;

/// Routes mounted at `/tecnico`.
///
/// ```text
/// GET  /reportes                      -> list_reports
/// GET  /reportes/{id}/detalle         -> report_detail
/// PUT  /reportes/{id}/estado          -> update_status
/// POST /reportes/{id}/seguimiento     -> add_follow_up
/// GET  /reportes/{id}/historial       -> report_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reportes", get(technician::list_reports))
        .route("/reportes/{id}/detalle", get(technician::report_detail))
        .route("/reportes/{id}/estado", put(technician::update_status))
        .route("/reportes/{id}/seguimiento", post(technician::add_follow_up))
        .route("/reportes/{id}/historial", get(technician::report_history))
}
