//! Report status vocabulary.
//!
//! `ReportStatus` is the closed set of workflow stages. The `codigo` column
//! of the `estados_reporte` lookup table is the storage boundary: rows are
//! matched by code, never by display name. Labels and colors live in the
//! table and are presentation only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A stage in a report's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Nuevo,
    AprobadoLider,
    RechazadoLider,
    Asignado,
    EnProceso,
    PendienteMateriales,
    Resuelto,
    Cerrado,
    Reabierto,
}

impl ReportStatus {
    /// Every status, in the display order seeded into `estados_reporte`.
    pub const ALL: [ReportStatus; 9] = [
        Self::Nuevo,
        Self::AprobadoLider,
        Self::RechazadoLider,
        Self::Asignado,
        Self::EnProceso,
        Self::PendienteMateriales,
        Self::Resuelto,
        Self::Cerrado,
        Self::Reabierto,
    ];

    /// Stable storage code matching `estados_reporte.codigo`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Nuevo => "nuevo",
            Self::AprobadoLider => "aprobado_lider",
            Self::RechazadoLider => "rechazado_lider",
            Self::Asignado => "asignado",
            Self::EnProceso => "en_proceso",
            Self::PendienteMateriales => "pendiente_materiales",
            Self::Resuelto => "resuelto",
            Self::Cerrado => "cerrado",
            Self::Reabierto => "reabierto",
        }
    }

    /// Default human-readable label (the seeded `nombre` value).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nuevo => "Nuevo",
            Self::AprobadoLider => "Aprobado por Líder",
            Self::RechazadoLider => "Rechazado por Líder",
            Self::Asignado => "Asignado",
            Self::EnProceso => "En Proceso",
            Self::PendienteMateriales => "Pendiente Materiales",
            Self::Resuelto => "Resuelto",
            Self::Cerrado => "Cerrado",
            Self::Reabierto => "Reabierto",
        }
    }

    /// Whether no further transition is expected from this status.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::RechazadoLider | Self::Cerrado)
    }

    /// Resolve a storage code to a variant.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Resolve a storage code read from the database.
    ///
    /// An unknown code means the lookup table and the binary disagree, which
    /// is a deployment problem rather than bad input.
    pub fn from_db_code(code: &str) -> Result<Self, CoreError> {
        Self::from_code(code).ok_or_else(|| {
            CoreError::Configuration(format!(
                "Unknown report status code '{code}' in estados_reporte"
            ))
        })
    }

    /// Join the labels of `statuses` for error messages.
    pub fn join_labels(statuses: &[ReportStatus]) -> String {
        if statuses.is_empty() {
            return "none".to_string();
        }
        statuses
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts either the storage code (`en_proceso`) or the label
/// (`En Proceso`, case-insensitive) so older clients that send labels keep
/// working.
impl FromStr for ReportStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::from_code(trimmed)
            .or_else(|| {
                let lowered = trimmed.to_lowercase();
                Self::ALL
                    .into_iter()
                    .find(|st| st.label().to_lowercase() == lowered)
            })
            .ok_or_else(|| CoreError::Validation(format!("Unknown report status '{trimmed}'")))
    }
}
