//! Read-only repositories for the three account tables.
//!
//! Login probes them by email; role extractors re-read them by id on every
//! request so deactivation and zone/department changes apply immediately.

use cocode_core::types::DbId;
use sqlx::PgPool;

use crate::models::account::{CitizenAccount, LeaderAccount, StaffAccount};

const STAFF_COLUMNS: &str =
    "id, nombre, email, password_hash, rol, id_departamento, estado, fecha_creacion";
const LEADER_COLUMNS: &str = "id, nombre, email, password_hash, id_zona, estado, fecha_creacion";
const CITIZEN_COLUMNS: &str = "id, nombre, email, password_hash, id_zona, estado, fecha_creacion";

/// Administrators and technicians (`administradores`).
pub struct StaffRepo;

impl StaffRepo {
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<StaffAccount>, sqlx::Error> {
        let query =
            format!("SELECT {STAFF_COLUMNS} FROM administradores WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, StaffAccount>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StaffAccount>, sqlx::Error> {
        let query = format!("SELECT {STAFF_COLUMNS} FROM administradores WHERE id = $1");
        sqlx::query_as::<_, StaffAccount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

/// Community leaders (`usuarios`).
pub struct LeaderRepo;

impl LeaderRepo {
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<LeaderAccount>, sqlx::Error> {
        let query = format!("SELECT {LEADER_COLUMNS} FROM usuarios WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, LeaderAccount>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LeaderAccount>, sqlx::Error> {
        let query = format!("SELECT {LEADER_COLUMNS} FROM usuarios WHERE id = $1");
        sqlx::query_as::<_, LeaderAccount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

/// Citizens (`ciudadanos_colaboradores`).
pub struct CitizenRepo;

impl CitizenRepo {
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<CitizenAccount>, sqlx::Error> {
        let query = format!(
            "SELECT {CITIZEN_COLUMNS} FROM ciudadanos_colaboradores WHERE lower(email) = lower($1)"
        );
        sqlx::query_as::<_, CitizenAccount>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CitizenAccount>, sqlx::Error> {
        let query = format!("SELECT {CITIZEN_COLUMNS} FROM ciudadanos_colaboradores WHERE id = $1");
        sqlx::query_as::<_, CitizenAccount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
