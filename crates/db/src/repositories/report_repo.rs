//! Repository for the `reportes` table.
//!
//! All reads filter out soft-deleted rows (`estado = FALSE`) and apply a
//! [`ReportScope`]. Writes that belong to the status workflow take a
//! `&mut PgConnection` so the caller can run them in one transaction.

use cocode_core::report::format_report_number;
use cocode_core::types::DbId;
use cocode_core::workflow::{ClosureStamp, TransitionEffects};
use sqlx::{PgConnection, PgPool};

use crate::models::report::{
    NewReport, Report, ReportListFilter, ReportScope, StatusCount, StatusUpdateExtras,
};

/// Projection over `r` joined with status (`e`), problem type (`tp`) and zone (`z`).
const PROJECTION: &str = "\
    r.id, r.numero_reporte, r.titulo, r.descripcion, r.direccion, \
    r.latitud, r.longitud, r.metodo_ubicacion, r.precision_metros, r.prioridad, \
    r.tipo_usuario_creador, r.id_ciudadano_creador, r.id_usuario_creador, \
    r.id_tipo_problema, tp.nombre AS tipo_problema_nombre, tp.id_departamento, \
    r.id_zona, z.nombre AS zona_nombre, \
    r.id_estado, e.codigo AS estado_codigo, e.nombre AS estado_nombre, e.color AS estado_color, \
    r.id_lider_coordinador, r.id_administrador_asignado, \
    r.fecha_reporte, r.fecha_asignacion, r.fecha_resolucion, r.fecha_cierre, r.fecha_modifica";

const FROM_JOINED: &str = "\
    FROM reportes r \
    JOIN estados_reporte e ON e.id = r.id_estado \
    JOIN tipos_problema tp ON tp.id = r.id_tipo_problema \
    JOIN zonas z ON z.id = r.id_zona";

/// WHERE clause for "active row with id `$1` inside `scope`" (scope value is `$2`).
fn id_in_scope_clause(scope: &ReportScope) -> String {
    match scope.condition(2) {
        Some(cond) => format!("WHERE r.id = $1 AND r.estado = TRUE AND {cond}"),
        None => "WHERE r.id = $1 AND r.estado = TRUE".to_string(),
    }
}

/// WHERE clause for list queries plus the next free placeholder index.
fn list_clause(scope: &ReportScope, filter: &ReportListFilter) -> (String, usize) {
    let mut conditions = vec!["r.estado = TRUE".to_string()];
    let mut param_idx: usize = 1;

    if let Some(cond) = scope.condition(param_idx) {
        conditions.push(cond);
        param_idx += 1;
    }
    if filter.status.is_some() {
        conditions.push(format!("e.codigo = ${param_idx}"));
        param_idx += 1;
    }
    if filter.zone_id.is_some() {
        conditions.push(format!("r.id_zona = ${param_idx}"));
        param_idx += 1;
    }

    (format!("WHERE {}", conditions.join(" AND ")), param_idx)
}

/// Provides query and workflow write operations for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a report in `status_id`, numbering it from `reportes_numero_seq`.
    pub async fn create(
        conn: &mut PgConnection,
        input: &NewReport,
        status_id: DbId,
    ) -> Result<Report, sqlx::Error> {
        let sequence: i64 = sqlx::query_scalar("SELECT nextval('reportes_numero_seq')")
            .fetch_one(&mut *conn)
            .await?;
        let numero = format_report_number(sequence);

        let (lat, lng, method, precision) = match &input.location {
            Some(loc) => (
                Some(loc.latitude),
                Some(loc.longitude),
                Some(loc.method.as_str()),
                loc.precision_meters,
            ),
            None => (None, None, None, None),
        };

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO reportes \
                (numero_reporte, titulo, descripcion, direccion, \
                 latitud, longitud, metodo_ubicacion, precision_metros, prioridad, \
                 tipo_usuario_creador, id_ciudadano_creador, id_usuario_creador, \
                 id_tipo_problema, id_zona, id_estado) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING id",
        )
        .bind(&numero)
        .bind(&input.titulo)
        .bind(&input.descripcion)
        .bind(&input.direccion)
        .bind(lat)
        .bind(lng)
        .bind(method)
        .bind(precision)
        .bind(input.prioridad.as_str())
        .bind(input.creator_kind())
        .bind(input.citizen_id())
        .bind(input.leader_id())
        .bind(input.id_tipo_problema)
        .bind(input.id_zona)
        .bind(status_id)
        .fetch_one(&mut *conn)
        .await?;

        Self::fetch_by_id(conn, id).await
    }

    /// Re-read a report by id inside a transaction, ignoring scope.
    async fn fetch_by_id(conn: &mut PgConnection, id: DbId) -> Result<Report, sqlx::Error> {
        let query = format!("SELECT {PROJECTION} {FROM_JOINED} WHERE r.id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// Find an active report visible in `scope`.
    pub async fn find_in_scope(
        pool: &PgPool,
        id: DbId,
        scope: ReportScope,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECTION} {FROM_JOINED} {}",
            id_in_scope_clause(&scope)
        );
        let mut q = sqlx::query_as::<_, Report>(&query).bind(id);
        if let Some(v) = scope.bind_value() {
            q = q.bind(v);
        }
        q.fetch_optional(pool).await
    }

    /// Find and row-lock an active report visible in `scope`.
    ///
    /// The lock is held until the caller's transaction ends, so concurrent
    /// status changes on the same report are applied one after the other and
    /// each sees the status the previous one wrote.
    pub async fn lock_in_scope(
        conn: &mut PgConnection,
        id: DbId,
        scope: ReportScope,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECTION} {FROM_JOINED} {} FOR UPDATE OF r",
            id_in_scope_clause(&scope)
        );
        let mut q = sqlx::query_as::<_, Report>(&query).bind(id);
        if let Some(v) = scope.bind_value() {
            q = q.bind(v);
        }
        q.fetch_optional(conn).await
    }

    /// Move a report to `status_id`, applying the timestamp effects of the
    /// target status. Returns the updated row.
    pub async fn update_status(
        conn: &mut PgConnection,
        id: DbId,
        status_id: DbId,
        effects: TransitionEffects,
        extras: StatusUpdateExtras,
    ) -> Result<Report, sqlx::Error> {
        let closure = match effects.closure {
            ClosureStamp::Keep => "fecha_cierre",
            ClosureStamp::Set => "NOW()",
            ClosureStamp::Clear => "NULL",
        };
        let query = format!(
            "UPDATE reportes SET \
                id_estado = $2, \
                fecha_modifica = NOW(), \
                fecha_asignacion = CASE WHEN $3 THEN NOW() ELSE fecha_asignacion END, \
                fecha_resolucion = CASE WHEN $4 THEN NOW() ELSE fecha_resolucion END, \
                fecha_cierre = {closure}, \
                id_lider_coordinador = COALESCE($5, id_lider_coordinador), \
                id_administrador_asignado = COALESCE($6, id_administrador_asignado) \
             WHERE id = $1"
        );
        sqlx::query(&query)
            .bind(id)
            .bind(status_id)
            .bind(effects.stamp_assignment)
            .bind(effects.stamp_resolution)
            .bind(extras.leader_coordinator)
            .bind(extras.assigned_technician)
            .execute(&mut *conn)
            .await?;

        Self::fetch_by_id(conn, id).await
    }

    /// Paginated reports in `scope`, newest first.
    pub async fn list_in_scope(
        pool: &PgPool,
        scope: ReportScope,
        filter: &ReportListFilter,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let (where_clause, param_idx) = list_clause(&scope, filter);
        let query = format!(
            "SELECT {PROJECTION} {FROM_JOINED} {where_clause} \
             ORDER BY r.fecha_reporte DESC, r.id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Report>(&query);
        if let Some(v) = scope.bind_value() {
            q = q.bind(v);
        }
        if let Some(status) = filter.status {
            q = q.bind(status.code());
        }
        if let Some(zone) = filter.zone_id {
            q = q.bind(zone);
        }
        q.bind(filter.limit).bind(filter.offset).fetch_all(pool).await
    }

    /// Count of reports matching the same conditions as [`Self::list_in_scope`].
    pub async fn count_in_scope(
        pool: &PgPool,
        scope: ReportScope,
        filter: &ReportListFilter,
    ) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = list_clause(&scope, filter);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM reportes r \
             JOIN estados_reporte e ON e.id = r.id_estado {where_clause}"
        );

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        if let Some(v) = scope.bind_value() {
            q = q.bind(v);
        }
        if let Some(status) = filter.status {
            q = q.bind(status.code());
        }
        if let Some(zone) = filter.zone_id {
            q = q.bind(zone);
        }
        q.fetch_one(pool).await
    }

    /// Per-status counts of active reports in `scope`.
    pub async fn status_counts(
        pool: &PgPool,
        scope: ReportScope,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        let (where_clause, _) = list_clause(&scope, &ReportListFilter::default());
        let query = format!(
            "SELECT e.codigo, COUNT(*)::BIGINT AS total FROM reportes r \
             JOIN estados_reporte e ON e.id = r.id_estado {where_clause} \
             GROUP BY e.codigo, e.orden ORDER BY e.orden"
        );
        let mut q = sqlx::query_as::<_, StatusCount>(&query);
        if let Some(v) = scope.bind_value() {
            q = q.bind(v);
        }
        q.fetch_all(pool).await
    }

    /// Reports assigned to a technician whose problem type belongs to the
    /// technician's department, most urgent first.
    pub async fn list_for_technician(
        pool: &PgPool,
        technician_id: DbId,
        department_id: DbId,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECTION} {FROM_JOINED} \
             WHERE r.estado = TRUE \
               AND r.id_administrador_asignado = $1 \
               AND tp.id_departamento = $2 \
             ORDER BY CASE r.prioridad WHEN 'Alta' THEN 0 WHEN 'Media' THEN 1 ELSE 2 END, \
                      r.fecha_asignacion DESC NULLS LAST, r.id DESC"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(technician_id)
            .bind(department_id)
            .fetch_all(pool)
            .await
    }
}
