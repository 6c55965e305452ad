//! Well-known role names.
//!
//! These strings appear in JWT claims, in `administradores.rol`, and in the
//! `tipo_usuario` column of `seguimiento_reportes`.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROLE_CITIZEN: &str = "ciudadano";
pub const ROLE_LEADER: &str = "lider";
pub const ROLE_TECHNICIAN: &str = "tecnico";
pub const ROLE_ADMIN: &str = "administrador";

/// The four kinds of account that can act on a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ciudadano")]
    Citizen,
    #[serde(rename = "lider")]
    Leader,
    #[serde(rename = "tecnico")]
    Technician,
    #[serde(rename = "administrador")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => ROLE_CITIZEN,
            Self::Leader => ROLE_LEADER,
            Self::Technician => ROLE_TECHNICIAN,
            Self::Admin => ROLE_ADMIN,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ROLE_CITIZEN => Some(Self::Citizen),
            ROLE_LEADER => Some(Self::Leader),
            ROLE_TECHNICIAN => Some(Self::Technician),
            ROLE_ADMIN => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
