//! Account rows used for login and for per-request scope checks.
//!
//! Account management lives elsewhere; this service only reads these tables.
//! Password hashes are never serialized.

use cocode_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `administradores` (administrators and technicians).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StaffAccount {
    pub id: DbId,
    pub nombre: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// `administrador` or `tecnico`.
    pub rol: String,
    pub id_departamento: Option<DbId>,
    pub estado: bool,
    pub fecha_creacion: Timestamp,
}

/// A row from `usuarios` (community leaders).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderAccount {
    pub id: DbId,
    pub nombre: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub id_zona: DbId,
    pub estado: bool,
    pub fecha_creacion: Timestamp,
}

/// A row from `ciudadanos_colaboradores`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CitizenAccount {
    pub id: DbId,
    pub nombre: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub id_zona: DbId,
    pub estado: bool,
    pub fecha_creacion: Timestamp,
}
