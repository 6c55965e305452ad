//! Repository for the `estados_reporte` lookup table.

use sqlx::{PgConnection, PgPool};

use crate::models::status::StatusRow;

/// Column list for `estados_reporte` queries.
const COLUMNS: &str = "id, codigo, nombre, descripcion, orden, color, es_final, estado";

/// Read access to the status vocabulary.
pub struct StatusRepo;

impl StatusRepo {
    /// All active statuses in display order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<StatusRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM estados_reporte WHERE estado = TRUE ORDER BY orden, id"
        );
        sqlx::query_as::<_, StatusRow>(&query).fetch_all(pool).await
    }

    /// Find an active status by its stable code.
    pub async fn find_by_code(
        conn: &mut PgConnection,
        code: &str,
    ) -> Result<Option<StatusRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM estados_reporte WHERE codigo = $1 AND estado = TRUE");
        sqlx::query_as::<_, StatusRow>(&query)
            .bind(code)
            .fetch_optional(conn)
            .await
    }
}
