//! Report creation rules: required text, location, priority, numbering.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum length of the free-text address.
pub const MIN_ADDRESS_LENGTH: usize = 10;

/// Latitude range accepted for GPS coordinates (national bounding box).
pub const LATITUDE_RANGE: (f64, f64) = (13.5, 18.5);

/// Longitude range accepted for GPS coordinates (national bounding box).
pub const LONGITUDE_RANGE: (f64, f64) = (-92.5, -88.0);

/// Prefix of the human-facing report number.
pub const REPORT_NUMBER_PREFIX: &str = "RPT-";

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Baja,
    #[default]
    Media,
    Alta,
}

impl Priority {
    /// Value stored in `reportes.prioridad`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baja => "Baja",
            Self::Media => "Media",
            Self::Alta => "Alta",
        }
    }

    /// Parse an optional client value; absent means `Media`.
    pub fn parse_optional(value: Option<&str>) -> Result<Self, CoreError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(Self::default()),
            Some(v) => match v.to_lowercase().as_str() {
                "baja" => Ok(Self::Baja),
                "media" => Ok(Self::Media),
                "alta" => Ok(Self::Alta),
                _ => Err(CoreError::Validation(format!(
                    "Invalid prioridad '{v}'. Must be one of: Baja, Media, Alta"
                ))),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// How the coordinates were captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMethod {
    Gps,
    Mapa,
    Manual,
}

impl LocationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gps => "gps",
            Self::Mapa => "mapa",
            Self::Manual => "manual",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_lowercase().as_str() {
            "gps" => Ok(Self::Gps),
            "mapa" => Ok(Self::Mapa),
            "manual" => Ok(Self::Manual),
            other => Err(CoreError::Validation(format!(
                "Invalid metodo_ubicacion '{other}'. Must be one of: gps, mapa, manual"
            ))),
        }
    }
}

/// Validated coordinates for a report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub method: LocationMethod,
    pub precision_meters: Option<f64>,
}

/// Validate optional GPS input.
///
/// Both coordinates or neither. When present they must fall inside the
/// national bounding box, which is a sanity filter rather than a border.
/// A missing method defaults to `gps`.
pub fn validate_location(
    latitude: Option<f64>,
    longitude: Option<f64>,
    method: Option<&str>,
    precision_meters: Option<f64>,
) -> Result<Option<GeoLocation>, CoreError> {
    let (latitude, longitude) = match (latitude, longitude) {
        (None, None) => return Ok(None),
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return Err(CoreError::Validation(
                "Both latitud and longitud are required when sending coordinates".to_string(),
            ))
        }
    };

    let (min_lat, max_lat) = LATITUDE_RANGE;
    let (min_lng, max_lng) = LONGITUDE_RANGE;
    if !(min_lat..=max_lat).contains(&latitude) || !(min_lng..=max_lng).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "Coordinates ({latitude}, {longitude}) are outside the allowed bounds \
             (latitud {min_lat} to {max_lat}, longitud {min_lng} to {max_lng})"
        )));
    }

    if let Some(p) = precision_meters {
        if !p.is_finite() || p < 0.0 {
            return Err(CoreError::Validation(
                "precision_metros must be a non-negative number".to_string(),
            ));
        }
    }

    let method = match method.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => LocationMethod::parse(m)?,
        None => LocationMethod::Gps,
    };

    Ok(Some(GeoLocation {
        latitude,
        longitude,
        method,
        precision_meters,
    }))
}

/// Summary echoed back after creation.
#[derive(Debug, Clone, Serialize)]
pub struct LocationSummary {
    /// `"gps"` when coordinates were stored, `"direccion"` otherwise.
    pub tipo: &'static str,
    pub tiene_coordenadas: bool,
    pub metodo_ubicacion: Option<LocationMethod>,
    pub direccion: String,
}

impl LocationSummary {
    pub fn new(location: Option<&GeoLocation>, address: &str) -> Self {
        Self {
            tipo: if location.is_some() { "gps" } else { "direccion" },
            tiene_coordenadas: location.is_some(),
            metodo_ubicacion: location.map(|l| l.method),
            direccion: address.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

/// Trim a required text field, rejecting blank values.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trim and check the address, which must be specific enough to find.
pub fn validate_address(value: &str) -> Result<String, CoreError> {
    let address = require_text("direccion", value)?;
    if address.chars().count() < MIN_ADDRESS_LENGTH {
        return Err(CoreError::Validation(format!(
            "direccion must be at least {MIN_ADDRESS_LENGTH} characters long"
        )));
    }
    Ok(address)
}

// ---------------------------------------------------------------------------
// Report number
// ---------------------------------------------------------------------------

/// Format the human-facing report number from a sequence value.
///
/// At least six digits, zero-padded.
pub fn format_report_number(sequence: i64) -> String {
    format!("{REPORT_NUMBER_PREFIX}{sequence:06}")
}
