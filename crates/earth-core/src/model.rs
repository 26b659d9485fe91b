//! Plain data types shared by the simulation, the chart pipeline and the
//! rendering collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable key of an Earth system, e.g. "atmosphere".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemId(pub String);

impl SystemId {
    pub fn new(id: impl Into<String>) -> Self {
        SystemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SystemId {
    fn from(s: &str) -> Self {
        SystemId(s.to_string())
    }
}

/// Layout position of a node on the interaction canvas, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// Static headline figure shown on a system's detail panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticImpact {
    /// Pre-formatted value, e.g. "421 ppm".
    pub value: String,
    /// Caption, e.g. "CO₂ Concentration".
    pub label: String,
}

/// Satellite mission that observes a system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionInfo {
    /// Mission name, e.g. "OCO-2".
    pub mission: String,
    /// What the mission measures.
    pub data_type: String,
    /// Free-form cadence, e.g. "Daily".
    pub update_frequency: String,
}

/// User-tunable climate parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Global temperature anomaly in °C.
    pub temperature: f64,
    /// Atmospheric CO₂ concentration in ppm.
    pub co2: f64,
    /// Annual deforestation rate in percent.
    pub deforestation_rate: f64,
}

impl SimulationParameters {
    /// Baseline temperature anomaly.
    pub const BASELINE_TEMPERATURE: f64 = 1.5;
    /// Baseline CO₂ concentration.
    pub const BASELINE_CO2: f64 = 421.0;
    /// Baseline deforestation rate.
    pub const BASELINE_DEFORESTATION: f64 = 15.0;

    pub const fn new(temperature: f64, co2: f64, deforestation_rate: f64) -> Self {
        SimulationParameters {
            temperature,
            co2,
            deforestation_rate,
        }
    }

    /// Replace every non-finite field with its baseline value.
    pub fn sanitized(self) -> Self {
        fn pick(v: f64, baseline: f64) -> f64 {
            if v.is_finite() {
                v
            } else {
                baseline
            }
        }
        SimulationParameters {
            temperature: pick(self.temperature, Self::BASELINE_TEMPERATURE),
            co2: pick(self.co2, Self::BASELINE_CO2),
            deforestation_rate: pick(self.deforestation_rate, Self::BASELINE_DEFORESTATION),
        }
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        SimulationParameters::new(
            Self::BASELINE_TEMPERATURE,
            Self::BASELINE_CO2,
            Self::BASELINE_DEFORESTATION,
        )
    }
}

/// One projected impact card produced by the simulation engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactMetric {
    /// Pre-formatted value with unit suffix, e.g. "150M".
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One yearly sample of the historical climate series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDataPoint {
    pub year: i32,
    /// Global mean surface temperature in °C.
    pub temperature: f64,
    /// CO₂ concentration in ppm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2: Option<f64>,
    /// Sea level change since the first sample, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sea_level: Option<f64>,
    /// Arctic sea ice extent in million km².
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice_extent: Option<f64>,
    /// Forest cover as a percentage of land area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forest_cover: Option<f64>,
}

impl HistoricalDataPoint {
    /// A point carrying only the temperature series, as most external feeds
    /// provide.
    pub fn temperature_only(year: i32, temperature: f64) -> Self {
        HistoricalDataPoint {
            year,
            temperature,
            co2: None,
            sea_level: None,
            ice_extent: None,
            forest_cover: None,
        }
    }
}
