//! Defines the climate parameters requested from the archive and the
//! user-facing variable names they answer to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A daily parameter as named by the NASA POWER archive.
///
/// Every prediction needs all three, and the archive returns them in a single
/// payload per grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClimateParameter {
    /// `T2M`: mean air temperature at 2 meters, in °C.
    Temperature,
    /// `PRECTOTCORR`: bias-corrected total precipitation, in mm/day.
    Precipitation,
    /// `WS10M`: mean wind speed at 10 meters, in m/s.
    WindSpeed,
}

impl ClimateParameter {
    pub const ALL: [ClimateParameter; 3] = [
        ClimateParameter::Temperature,
        ClimateParameter::Precipitation,
        ClimateParameter::WindSpeed,
    ];

    pub(crate) fn code(&self) -> &'static str {
        match self {
            ClimateParameter::Temperature => "T2M",
            ClimateParameter::Precipitation => "PRECTOTCORR",
            ClimateParameter::WindSpeed => "WS10M",
        }
    }

    /// Comma-separated codes for the `parameters` query argument.
    pub(crate) fn query_list() -> String {
        Self::ALL
            .iter()
            .map(|p| p.code())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Formats a parameter using its archive code.
///
/// # Examples
///
/// ```
/// use weather_odds::ClimateParameter;
///
/// assert_eq!(ClimateParameter::Temperature.to_string(), "T2M");
/// assert_eq!(ClimateParameter::WindSpeed.to_string(), "WS10M");
/// ```
impl fmt::Display for ClimateParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A variable the caller is interested in, as sent by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variable {
    Temperature,
    Rainfall,
    Windspeed,
}

impl Variable {
    pub const ALL: [Variable; 3] = [Variable::Temperature, Variable::Rainfall, Variable::Windspeed];

    /// Parses a UI variable name. Matching is case-insensitive; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "temperature" => Some(Variable::Temperature),
            "rainfall" => Some(Variable::Rainfall),
            "windspeed" => Some(Variable::Windspeed),
            _ => None,
        }
    }

    /// The archive parameter backing this variable.
    pub fn parameter(&self) -> ClimateParameter {
        match self {
            Variable::Temperature => ClimateParameter::Temperature,
            Variable::Rainfall => ClimateParameter::Precipitation,
            Variable::Windspeed => ClimateParameter::WindSpeed,
        }
    }
}
