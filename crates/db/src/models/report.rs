//! Report entity model, scope filter, and insert DTO.

use cocode_core::error::CoreError;
use cocode_core::report::{GeoLocation, Priority};
use cocode_core::report_status::ReportStatus;
use cocode_core::roles::{ROLE_CITIZEN, ROLE_LEADER};
use cocode_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `reportes` joined with its status, problem type and zone.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub numero_reporte: String,
    pub titulo: String,
    pub descripcion: String,
    pub direccion: String,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub metodo_ubicacion: Option<String>,
    pub precision_metros: Option<f64>,
    pub prioridad: String,
    pub tipo_usuario_creador: String,
    pub id_ciudadano_creador: Option<DbId>,
    pub id_usuario_creador: Option<DbId>,
    pub id_tipo_problema: DbId,
    pub tipo_problema_nombre: String,
    pub id_departamento: DbId,
    pub id_zona: DbId,
    pub zona_nombre: String,
    pub id_estado: DbId,
    pub estado_codigo: String,
    pub estado_nombre: String,
    pub estado_color: String,
    pub id_lider_coordinador: Option<DbId>,
    pub id_administrador_asignado: Option<DbId>,
    pub fecha_reporte: Timestamp,
    pub fecha_asignacion: Option<Timestamp>,
    pub fecha_resolucion: Option<Timestamp>,
    pub fecha_cierre: Option<Timestamp>,
    pub fecha_modifica: Timestamp,
}

impl Report {
    /// The workflow status, resolved from the stored code.
    pub fn status(&self) -> Result<ReportStatus, CoreError> {
        ReportStatus::from_db_code(&self.estado_codigo)
    }
}

/// Creator of a report. Stored as a discriminator plus two nullable keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCreator {
    Citizen(DbId),
    Leader(DbId),
}

impl ReportCreator {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Citizen(_) => ROLE_CITIZEN,
            Self::Leader(_) => ROLE_LEADER,
        }
    }

    fn citizen_id(&self) -> Option<DbId> {
        match self {
            Self::Citizen(id) => Some(*id),
            Self::Leader(_) => None,
        }
    }

    fn leader_id(&self) -> Option<DbId> {
        match self {
            Self::Leader(id) => Some(*id),
            Self::Citizen(_) => None,
        }
    }
}

/// Which reports a caller may see or act on.
///
/// Every read and every status change goes through one of these, so a
/// report outside the caller's scope is indistinguishable from a missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    /// Reports created by this citizen.
    Citizen(DbId),
    /// Reports in this zone (community leaders).
    Zone(DbId),
    /// Reports assigned to this technician.
    AssignedTo(DbId),
    /// Every active report (administrators).
    All,
}

impl ReportScope {
    /// SQL condition for this scope using placeholder `$param_idx`, or `None`
    /// when the scope is unrestricted.
    pub(crate) fn condition(&self, param_idx: usize) -> Option<String> {
        match self {
            Self::Citizen(_) => Some(format!(
                "r.tipo_usuario_creador = '{ROLE_CITIZEN}' AND r.id_ciudadano_creador = ${param_idx}"
            )),
            Self::Zone(_) => Some(format!("r.id_zona = ${param_idx}")),
            Self::AssignedTo(_) => Some(format!("r.id_administrador_asignado = ${param_idx}")),
            Self::All => None,
        }
    }

    /// The value bound to the placeholder from [`ReportScope::condition`].
    pub(crate) fn bind_value(&self) -> Option<DbId> {
        match self {
            Self::Citizen(id) | Self::Zone(id) | Self::AssignedTo(id) => Some(*id),
            Self::All => None,
        }
    }
}

/// Validated input for inserting a report.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub titulo: String,
    pub descripcion: String,
    pub direccion: String,
    pub location: Option<GeoLocation>,
    pub prioridad: Priority,
    pub creator: ReportCreator,
    pub id_tipo_problema: DbId,
    pub id_zona: DbId,
}

impl NewReport {
    pub(crate) fn creator_kind(&self) -> &'static str {
        self.creator.kind()
    }

    pub(crate) fn citizen_id(&self) -> Option<DbId> {
        self.creator.citizen_id()
    }

    pub(crate) fn leader_id(&self) -> Option<DbId> {
        self.creator.leader_id()
    }
}

/// Columns written alongside a status change, besides the status itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusUpdateExtras {
    /// Recorded when a leader approves or rejects.
    pub leader_coordinator: Option<DbId>,
    /// Set when an administrator assigns a technician.
    pub assigned_technician: Option<DbId>,
}

/// Filters for paginated report listings.
#[derive(Debug, Clone, Default)]
pub struct ReportListFilter {
    pub status: Option<ReportStatus>,
    pub zone_id: Option<DbId>,
    pub limit: i64,
    pub offset: i64,
}

/// Query parameters for paginated report lists (`?estado=&page=&limit=`).
#[derive(Debug, Deserialize)]
pub struct ReportListParams {
    pub estado: Option<String>,
    pub zona: Option<DbId>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Number of reports per status code.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub codigo: String,
    pub total: i64,
}
