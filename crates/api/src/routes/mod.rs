pub mod admin;
pub mod auth;
pub mod catalog;
pub mod citizen;
pub mod health;
pub mod leader;
pub mod technician;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                 login (public)
/// /auth/me                                    token identity
///
/// /catalogos/estados                          status vocabulary
/// /catalogos/tipos-problema                   active problem types
///
/// /ciudadano/reportes                         own reports + stats, create
/// /ciudadano/reportes/{id}                    own report detail
/// /ciudadano/reportes/{id}/comentario         comment (POST)
///
/// /lider/reportes                             zone reports (paged), create
/// /lider/reportes/pendientes                  zone reports in Nuevo
/// /lider/reportes/{id}/aprobar                approve (POST)
/// /lider/reportes/{id}/rechazar               reject (POST)
/// /lider/reportes/{id}/validar                close or reopen (POST)
/// /lider/reportes/{id}/historial              audit trail
///
/// /tecnico/reportes                           assigned reports + photos
/// /tecnico/reportes/{id}/detalle              assigned report detail
/// /tecnico/reportes/{id}/estado               change status (PUT)
/// /tecnico/reportes/{id}/seguimiento          follow-up (POST)
/// /tecnico/reportes/{id}/historial            audit trail
///
/// /admin/reportes                             all reports (paged)
/// /admin/reportes/{id}/asignar                assign technician (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/catalogos", catalog::router())
        .nest("/ciudadano", citizen::router())
        .nest("/lider", leader::router())
        .nest("/tecnico", technician::router())
        .nest("/admin", admin::router())
}
