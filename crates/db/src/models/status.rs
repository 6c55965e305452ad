//! Report status lookup rows (`estados_reporte`).

use cocode_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `estados_reporte` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusRow {
    pub id: DbId,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub orden: i16,
    pub color: String,
    pub es_final: bool,
    pub estado: bool,
}
