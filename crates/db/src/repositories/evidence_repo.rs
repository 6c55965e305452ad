//! Repository for `archivos_reporte` (evidence photo metadata).

use cocode_core::types::DbId;
use sqlx::PgPool;

use crate::models::evidence::EvidenceFile;

/// Column list for `archivos_reporte` queries.
const COLUMNS: &str = "\
    id, id_reporte, nombre_archivo, url, tipo_mime, tamano_bytes, \
    tipo_usuario_subida, id_usuario_subida, es_evidencia_inicial, fecha_subida";

pub struct EvidenceRepo;

impl EvidenceRepo {
    /// Active files for one report, oldest first.
    pub async fn list_for_report(
        pool: &PgPool,
        report_id: DbId,
    ) -> Result<Vec<EvidenceFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM archivos_reporte \
             WHERE id_reporte = $1 AND estado = TRUE \
             ORDER BY fecha_subida, id"
        );
        sqlx::query_as::<_, EvidenceFile>(&query)
            .bind(report_id)
            .fetch_all(pool)
            .await
    }

    /// Active files for many reports in one round trip.
    pub async fn list_for_reports(
        pool: &PgPool,
        report_ids: &[DbId],
    ) -> Result<Vec<EvidenceFile>, sqlx::Error> {
        if report_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM archivos_reporte \
             WHERE id_reporte = ANY($1) AND estado = TRUE \
             ORDER BY id_reporte, fecha_subida, id"
        );
        sqlx::query_as::<_, EvidenceFile>(&query)
            .bind(report_ids)
            .fetch_all(pool)
            .await
    }
}
