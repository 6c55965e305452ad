//! Route definitions for the `/ciudadano` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::citizen;
use crate::state::AppState;

/// Routes mounted at `/ciudadano`.
///
/// ```text
/// GET  /reportes                      -> list_reports
/// POST /reportes                      -> create_report
/// GET  /reportes/{id}                 -> get_report
/// POST /reportes/{id}/comentario      -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/reportes",
            get(citizen::list_reports).post(citizen::create_report),
        )
        .route("/reportes/{id}", get(citizen::get_report))
        .route("/reportes/{id}/comentario", post(citizen::add_comment))
}
