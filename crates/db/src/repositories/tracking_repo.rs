//! Repository for the append-only `seguimiento_reportes` table.
//!
//! There is no update or delete method; the table also rejects both with a
//! trigger.

use cocode_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::tracking::{NewTrackingEntry, TrackingEntry};

/// Projection over an `s` alias joined with the previous (`ea`) and new
/// (`en`) status rows.
const PROJECTION: &str = "\
    s.id, s.id_reporte, s.tipo_usuario, s.id_usuario, \
    s.estado_anterior, ea.codigo AS estado_anterior_codigo, ea.nombre AS estado_anterior_nombre, \
    s.estado_nuevo, en.codigo AS estado_nuevo_codigo, en.nombre AS estado_nuevo_nombre, \
    s.comentario, s.tipo_seguimiento, s.accion_tomada, s.tiempo_invertido_horas, \
    s.fecha_seguimiento";

const STATUS_JOINS: &str = "\
    LEFT JOIN estados_reporte ea ON ea.id = s.estado_anterior \
    LEFT JOIN estados_reporte en ON en.id = s.estado_nuevo";

pub struct TrackingRepo;

impl TrackingRepo {
    /// Append one entry inside the caller's transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        entry: &NewTrackingEntry,
    ) -> Result<TrackingEntry, sqlx::Error> {
        let query = format!(
            "WITH s AS ( \
                INSERT INTO seguimiento_reportes \
                    (id_reporte, tipo_usuario, id_usuario, estado_anterior, estado_nuevo, \
                     comentario, tipo_seguimiento, accion_tomada, tiempo_invertido_horas) \
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
                RETURNING * \
             ) \
             SELECT {PROJECTION} FROM s {STATUS_JOINS}"
        );
        sqlx::query_as::<_, TrackingEntry>(&query)
            .bind(entry.report_id)
            .bind(entry.actor.role.as_str())
            .bind(entry.actor.id)
            .bind(entry.previous_status)
            .bind(entry.new_status)
            .bind(&entry.comment)
            .bind(entry.kind.code())
            .bind(&entry.action_taken)
            .bind(entry.hours_spent)
            .fetch_one(conn)
            .await
    }

    /// Full trail for a report, oldest first.
    pub async fn list_for_report(
        pool: &PgPool,
        report_id: DbId,
    ) -> Result<Vec<TrackingEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECTION} FROM seguimiento_reportes s {STATUS_JOINS} \
             WHERE s.id_reporte = $1 \
             ORDER BY s.fecha_seguimiento, s.id"
        );
        sqlx::query_as::<_, TrackingEntry>(&query)
            .bind(report_id)
            .fetch_all(pool)
            .await
    }

    /// Number of entries recorded for a report.
    pub async fn count_for_report(pool: &PgPool, report_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM seguimiento_reportes WHERE id_reporte = $1",
        )
        .bind(report_id)
        .fetch_one(pool)
        .await
    }
}
