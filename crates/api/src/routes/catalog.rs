//! Route definitions for the `/catalogos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalogos`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/estados", get(catalog::list_statuses))
        .route("/tipos-problema", get(catalog::list_problem_types))
}
