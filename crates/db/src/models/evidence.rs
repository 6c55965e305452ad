//! Evidence photo metadata (`archivos_reporte`).

use cocode_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An uploaded photo attached to a report. Only active rows are read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EvidenceFile {
    pub id: DbId,
    pub id_reporte: DbId,
    pub nombre_archivo: String,
    pub url: String,
    pub tipo_mime: String,
    pub tamano_bytes: i64,
    pub tipo_usuario_subida: String,
    pub id_usuario_subida: DbId,
    pub es_evidencia_inicial: bool,
    pub fecha_subida: Timestamp,
}
