//! Role extractors.
//!
//! Each extractor wraps [`AuthUser`], rejects other roles with 403, and
//! re-reads the account row so that a deactivated account is refused and
//! the caller's zone or department is current for this request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cocode_core::error::CoreError;
use cocode_core::roles::{Role, ROLE_TECHNICIAN};
use cocode_core::tracking::Actor;
use cocode_core::types::DbId;
use cocode_db::repositories::{CitizenRepo, LeaderRepo, StaffRepo};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

fn require_role(user: &AuthUser, role: Role, label: &str) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{label} role required"
        ))));
    }
    Ok(())
}

fn account_gone() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Account for this token no longer exists".into(),
    ))
}

fn account_inactive() -> AppError {
    AppError::Core(CoreError::Forbidden("Account is inactive".into()))
}

// ---------------------------------------------------------------------------
// Citizen
// ---------------------------------------------------------------------------

/// An active citizen and the zone their profile belongs to.
#[derive(Debug, Clone)]
pub struct CitizenContext {
    pub id: DbId,
    pub zone_id: DbId,
}

impl CitizenContext {
    pub fn actor(&self) -> Actor {
        Actor::new(Role::Citizen, self.id)
    }
}

/// Requires the `ciudadano` role and an active citizen account.
pub struct RequireCitizen(pub CitizenContext);

impl FromRequestParts<AppState> for RequireCitizen {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_role(&user, Role::Citizen, "Citizen")?;

        let account = CitizenRepo::find_by_id(&state.pool, user.account_id)
            .await?
            .ok_or_else(account_gone)?;
        if !account.estado {
            return Err(account_inactive());
        }

        Ok(RequireCitizen(CitizenContext {
            id: account.id,
            zone_id: account.id_zona,
        }))
    }
}

// ---------------------------------------------------------------------------
// Leader
// ---------------------------------------------------------------------------

/// An active community leader and the zone they coordinate.
#[derive(Debug, Clone)]
pub struct LeaderContext {
    pub id: DbId,
    pub zone_id: DbId,
}

impl LeaderContext {
    pub fn actor(&self) -> Actor {
        Actor::new(Role::Leader, self.id)
    }
}

/// Requires the `lider` role and an active leader account.
pub struct RequireLeader(pub LeaderContext);

impl FromRequestParts<AppState> for RequireLeader {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_role(&user, Role::Leader, "Leader")?;

        let account = LeaderRepo::find_by_id(&state.pool, user.account_id)
            .await?
            .ok_or_else(account_gone)?;
        if !account.estado {
            return Err(account_inactive());
        }

        Ok(RequireLeader(LeaderContext {
            id: account.id,
            zone_id: account.id_zona,
        }))
    }
}

// ---------------------------------------------------------------------------
// Technician
// ---------------------------------------------------------------------------

/// An active technician and their department.
#[derive(Debug, Clone)]
pub struct TechnicianContext {
    pub id: DbId,
    pub department_id: DbId,
}

impl TechnicianContext {
    pub fn actor(&self) -> Actor {
        Actor::new(Role::Technician, self.id)
    }
}

/// Requires the `tecnico` role and an active technician row with a
/// department.
pub struct RequireTechnician(pub TechnicianContext);

impl FromRequestParts<AppState> for RequireTechnician {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_role(&user, Role::Technician, "Technician")?;

        let account = StaffRepo::find_by_id(&state.pool, user.account_id)
            .await?
            .ok_or_else(account_gone)?;

        let department_id = match account.id_departamento {
            Some(dept) if account.estado && account.rol == ROLE_TECHNICIAN => dept,
            _ => {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Not an active technician".into(),
                )))
            }
        };

        Ok(RequireTechnician(TechnicianContext {
            id: account.id,
            department_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Administrator
// ---------------------------------------------------------------------------

/// An active administrator.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub id: DbId,
}

impl AdminContext {
    pub fn actor(&self) -> Actor {
        Actor::new(Role::Admin, self.id)
    }
}

/// Requires the `administrador` role and an active administrator row.
pub struct RequireAdmin(pub AdminContext);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_role(&user, Role::Admin, "Admin")?;

        let account = StaffRepo::find_by_id(&state.pool, user.account_id)
            .await?
            .ok_or_else(account_gone)?;
        if !account.estado || account.rol != Role::Admin.as_str() {
            return Err(account_inactive());
        }

        Ok(RequireAdmin(AdminContext { id: account.id }))
    }
}
