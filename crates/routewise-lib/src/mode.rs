//! Transport modes and the per-kilometre coefficients used to derive travel
//! time, monetary cost, and carbon emissions from a link distance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Mode of travel along a link.
///
/// Modes read from a store that are not one of the four known values are kept
/// as [`TransportMode::Other`] and priced like a car.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransportMode {
    Car,
    Bus,
    Metro,
    Walk,
    Other(String),
}

/// Coefficients applied to a link distance for one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeProfile {
    /// Average speed in km/h.
    pub speed_kmh: f64,
    /// Currency units (AED) per km.
    pub cost_per_km: f64,
    /// kg CO2 per km.
    pub emissions_per_km: f64,
}

const CAR: ModeProfile = ModeProfile {
    speed_kmh: 90.0,
    cost_per_km: 0.5,
    emissions_per_km: 0.171,
};

const BUS: ModeProfile = ModeProfile {
    speed_kmh: 60.0,
    cost_per_km: 0.15,
    emissions_per_km: 0.089,
};

const METRO: ModeProfile = ModeProfile {
    speed_kmh: 80.0,
    cost_per_km: 0.2,
    emissions_per_km: 0.041,
};

const WALK: ModeProfile = ModeProfile {
    speed_kmh: 5.0,
    cost_per_km: 0.0,
    emissions_per_km: 0.0,
};

impl TransportMode {
    /// The four modes accepted when persisting new links.
    pub const KNOWN: [TransportMode; 4] = [
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Metro,
        TransportMode::Walk,
    ];

    /// Parse one of the four known modes, case-insensitively.
    pub fn parse_known(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CAR" => Some(TransportMode::Car),
            "BUS" => Some(TransportMode::Bus),
            "METRO" => Some(TransportMode::Metro),
            "WALK" => Some(TransportMode::Walk),
            _ => None,
        }
    }

    /// Upper-case label as stored in the database.
    pub fn as_str(&self) -> &str {
        match self {
            TransportMode::Car => "CAR",
            TransportMode::Bus => "BUS",
            TransportMode::Metro => "METRO",
            TransportMode::Walk => "WALK",
            TransportMode::Other(raw) => raw.as_str(),
        }
    }

    /// Whether this is one of the four supported modes.
    pub fn is_known(&self) -> bool {
        !matches!(self, TransportMode::Other(_))
    }

    /// Coefficients for this mode. Unknown modes use the car profile.
    pub fn profile(&self) -> ModeProfile {
        match self {
            TransportMode::Car | TransportMode::Other(_) => CAR,
            TransportMode::Bus => BUS,
            TransportMode::Metro => METRO,
            TransportMode::Walk => WALK,
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TransportMode {
    fn from(value: String) -> Self {
        TransportMode::parse_known(&value).unwrap_or(TransportMode::Other(value))
    }
}

impl From<&str> for TransportMode {
    fn from(value: &str) -> Self {
        TransportMode::from(value.to_string())
    }
}

impl From<TransportMode> for String {
    fn from(value: TransportMode) -> Self {
        match value {
            TransportMode::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Strict parsing; only the four supported modes are accepted.
impl FromStr for TransportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransportMode::parse_known(s).ok_or_else(|| Error::InvalidMode {
            mode: s.to_string(),
        })
    }
}

/// Travel time in minutes for `distance` km.
pub fn time_of(distance: f64, mode: &TransportMode) -> f64 {
    distance / mode.profile().speed_kmh * 60.0
}

/// Monetary cost for `distance` km.
pub fn cost_of(distance: f64, mode: &TransportMode) -> f64 {
    distance * mode.profile().cost_per_km
}

/// Emissions in kg CO2 for `distance` km.
pub fn emissions_of(distance: f64, mode: &TransportMode) -> f64 {
    distance * mode.profile().emissions_per_km
}
