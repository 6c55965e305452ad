//! Route definitions for the `/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reportes", get(admin::list_reports))
        .route("/reportes/{id}/asignar", put(admin::assign_technician))
}
