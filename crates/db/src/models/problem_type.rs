//! Problem type reference rows (`tipos_problema`).

use cocode_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A problem type joined with its responsible department.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProblemType {
    pub id: DbId,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub id_departamento: DbId,
    pub departamento_nombre: String,
    pub estado: bool,
}
