//! Repository for the `tipos_problema` table (read-only).

use cocode_core::types::DbId;
use sqlx::PgPool;

use crate::models::problem_type::ProblemType;

const SELECT: &str = "\
    SELECT tp.id, tp.nombre, tp.descripcion, tp.id_departamento, \
           d.nombre AS departamento_nombre, tp.estado \
    FROM tipos_problema tp \
    JOIN departamentos d ON d.id = tp.id_departamento";

pub struct ProblemTypeRepo;

impl ProblemTypeRepo {
    /// Active problem types, alphabetically.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<ProblemType>, sqlx::Error> {
        let query = format!("{SELECT} WHERE tp.estado = TRUE ORDER BY tp.nombre");
        sqlx::query_as::<_, ProblemType>(&query).fetch_all(pool).await
    }

    /// Find a problem type by id, only if it is active.
    pub async fn find_active(pool: &PgPool, id: DbId) -> Result<Option<ProblemType>, sqlx::Error> {
        let query = format!("{SELECT} WHERE tp.id = $1 AND tp.estado = TRUE");
        sqlx::query_as::<_, ProblemType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
