//! Read-only catalog endpoints used to populate client forms.

use axum::extract::State;
use axum::Json;
use cocode_db::models::problem_type::ProblemType;
use cocode_db::models::status::StatusRow;
use cocode_db::repositories::{ProblemTypeRepo, StatusRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/catalogos/estados
///
/// The status vocabulary in workflow order, with display metadata.
pub async fn list_statuses(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<StatusRow>>>> {
    let statuses = StatusRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: statuses }))
}

/// GET /api/catalogos/tipos-problema
pub async fn list_problem_types(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProblemType>>>> {
    let types = ProblemTypeRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: types }))
}
