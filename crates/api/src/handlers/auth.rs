//! Handlers for the `/auth` resource (login, current identity).

use axum::extract::State;
use axum::Json;
use cocode_core::error::CoreError;
use cocode_core::roles::Role;
use cocode_core::types::DbId;
use cocode_db::repositories::{CitizenRepo, LeaderRepo, StaffRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public account info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub nombre: String,
    pub email: String,
    pub rol: Role,
}

/// The fields login needs, whichever table the account came from.
struct Credentials {
    id: DbId,
    nombre: String,
    email: String,
    password_hash: String,
    role: Role,
    active: bool,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".into(),
    ))
}

/// Probe the account tables in order: staff, leaders, citizens.
async fn find_credentials(state: &AppState, email: &str) -> AppResult<Option<Credentials>> {
    if let Some(staff) = StaffRepo::find_by_email(&state.pool, email).await? {
        let role = Role::parse(&staff.rol).ok_or_else(|| {
            AppError::InternalError(format!(
                "Staff account {} has unknown rol '{}'",
                staff.id, staff.rol
            ))
        })?;
        return Ok(Some(Credentials {
            id: staff.id,
            nombre: staff.nombre,
            email: staff.email,
            password_hash: staff.password_hash,
            role,
            active: staff.estado,
        }));
    }

    if let Some(leader) = LeaderRepo::find_by_email(&state.pool, email).await? {
        return Ok(Some(Credentials {
            id: leader.id,
            nombre: leader.nombre,
            email: leader.email,
            password_hash: leader.password_hash,
            role: Role::Leader,
            active: leader.estado,
        }));
    }

    if let Some(citizen) = CitizenRepo::find_by_email(&state.pool, email).await? {
        return Ok(Some(Credentials {
            id: citizen.id,
            nombre: citizen.nombre,
            email: citizen.email,
            password_hash: citizen.password_hash,
            role: Role::Citizen,
            active: citizen.estado,
        }));
    }

    Ok(None)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with email + password. Returns an access token.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    input.validate()?;
    let email = input.email.trim();

    let account = find_credentials(&state, email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(account_id = account.id, role = %account.role, "Login rejected");
        return Err(invalid_credentials());
    }

    if !account.active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let access_token = generate_access_token(account.id, account.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(account_id = account.id, role = %account.role, "Login succeeded");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: account.id,
            nombre: account.nombre,
            email: account.email,
            rol: account.role,
        },
    }))
}

/// Identity carried by the caller's token.
#[derive(Debug, Serialize)]
pub struct Identity {
    pub id: DbId,
    pub rol: Role,
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<DataResponse<Identity>> {
    Json(DataResponse {
        data: Identity {
            id: auth.account_id,
            rol: auth.role,
        },
    })
}
