#![deny(warnings)]

//! Simulation engine: maps the three climate parameters to impact cards.
//!
//! This crate provides:
//! - The fixed illustrative impact formulas, with half-away-from-zero rounding
//! - Caller-side coercion of raw user input to validated parameters
//! - A linear scenario projection to 2100
//! - Display filters for percentages and large counts

pub mod format;
pub mod scenario;

pub use format::{format_large_number, format_percentage};
pub use scenario::{run_scenario, ProjectionPoint, ScenarioProjection};

use earth_core::{ImpactMetric, SimulationParameters};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::debug;

/// The six projected impacts, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImpactKind {
    ExtremeWeather,
    SpeciesAtRisk,
    CropYield,
    ClimateRefugees,
    SeaLevelRise,
    EconomicImpact,
}

impl ImpactKind {
    /// All kinds in the order the UI shows them.
    pub const ALL: [ImpactKind; 6] = [
        ImpactKind::ExtremeWeather,
        ImpactKind::SpeciesAtRisk,
        ImpactKind::CropYield,
        ImpactKind::ClimateRefugees,
        ImpactKind::SeaLevelRise,
        ImpactKind::EconomicImpact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ImpactKind::ExtremeWeather => "Extreme Weather Events",
            ImpactKind::SpeciesAtRisk => "Species at Risk",
            ImpactKind::CropYield => "Crop Yield Change",
            ImpactKind::ClimateRefugees => "Climate Refugees",
            ImpactKind::SeaLevelRise => "Sea Level Rise",
            ImpactKind::EconomicImpact => "Economic Impact",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ImpactKind::ExtremeWeather => "🌪️",
            ImpactKind::SpeciesAtRisk => "🦎",
            ImpactKind::CropYield => "🌽",
            ImpactKind::ClimateRefugees => "👥",
            ImpactKind::SeaLevelRise => "🌊",
            ImpactKind::EconomicImpact => "💰",
        }
    }

    /// Rounded numeric value of this impact.
    ///
    /// Every formula has the shape `round(input * factor + offset)`.
    pub fn amount(self, p: &SimulationParameters) -> i64 {
        let (input, factor, offset) = match self {
            ImpactKind::ExtremeWeather => (p.temperature, Decimal::new(15, 0), Decimal::ZERO),
            ImpactKind::SpeciesAtRisk => (p.deforestation_rate, Decimal::new(25, 1), Decimal::ZERO),
            // co2 / 10 - 30
            ImpactKind::CropYield => (p.co2, Decimal::new(1, 1), Decimal::new(-30, 0)),
            ImpactKind::ClimateRefugees => (p.temperature, Decimal::ONE_HUNDRED, Decimal::ZERO),
            ImpactKind::SeaLevelRise => (p.temperature, Decimal::new(33, 1), Decimal::ZERO),
            ImpactKind::EconomicImpact => (p.temperature, Decimal::TWO, Decimal::ZERO),
        };
        round_linear(input, factor, offset)
    }

    /// Format a rounded amount with this kind's unit.
    pub fn format(self, amount: i64) -> String {
        match self {
            ImpactKind::ExtremeWeather | ImpactKind::CropYield => format!("{amount}%"),
            ImpactKind::SpeciesAtRisk | ImpactKind::ClimateRefugees => format!("{amount}M"),
            ImpactKind::SeaLevelRise => format!("{amount}mm/yr"),
            ImpactKind::EconomicImpact => format!("${amount}T"),
        }
    }

    pub fn metric(self, p: &SimulationParameters) -> ImpactMetric {
        ImpactMetric {
            value: self.format(self.amount(p)),
            label: self.label().to_string(),
            icon: Some(self.icon().to_string()),
        }
    }
}

/// `round(x * factor + offset)` with ties rounded away from zero.
///
/// Computed in decimal so that inputs like 1.5 * 3.3 are not disturbed by
/// binary representation error. Values outside the decimal range fall back
/// to `f64::round`, which also rounds ties away from zero; the cast
/// saturates and maps NaN to 0.
pub fn round_linear(x: f64, factor: Decimal, offset: Decimal) -> i64 {
    let exact = Decimal::from_f64(x)
        .and_then(|d| d.checked_mul(factor))
        .and_then(|d| d.checked_add(offset))
        .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_i64());
    exact.unwrap_or_else(|| {
        let f = factor.to_f64().unwrap_or(0.0);
        let o = offset.to_f64().unwrap_or(0.0);
        (x * f + o).round() as i64
    })
}

/// Project the six impacts for the given parameters, in fixed order.
///
/// Never fails. Callers are expected to substitute baselines for missing
/// input first (see [`coerce_parameters`]).
pub fn calculate_impacts(temperature: f64, co2: f64, deforestation_rate: f64) -> Vec<ImpactMetric> {
    let params = SimulationParameters::new(temperature, co2, deforestation_rate);
    let impacts: Vec<ImpactMetric> = ImpactKind::ALL.iter().map(|k| k.metric(&params)).collect();
    debug!(?params, "impacts calculated");
    impacts
}

/// [`calculate_impacts`] over a parameter struct.
pub fn calculate_impacts_for(params: &SimulationParameters) -> Vec<ImpactMetric> {
    calculate_impacts(params.temperature, params.co2, params.deforestation_rate)
}

/// Errors produced when parsing a raw parameter value.
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    /// No value was supplied.
    #[error("missing value")]
    Missing,
    /// The text has no numeric prefix.
    #[error("not a number: {0:?}")]
    NotANumber(String),
    /// The value parsed to NaN or infinity.
    #[error("non-finite value")]
    NonFinite,
}

/// Parse user text into a finite number.
///
/// Surrounding whitespace is ignored and trailing garbage after a numeric
/// prefix is dropped, so `"1.5°C"` parses as 1.5.
pub fn parse_parameter(raw: Option<&str>) -> Result<f64, ParameterError> {
    let text = raw.map(str::trim).filter(|t| !t.is_empty());
    let Some(text) = text else {
        return Err(ParameterError::Missing);
    };
    let value = text
        .parse::<f64>()
        .ok()
        .or_else(|| numeric_prefix(text).parse::<f64>().ok());
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(ParameterError::NonFinite),
        None => Err(ParameterError::NotANumber(text.to_string())),
    }
}

/// Longest leading slice shaped like a float literal: sign, digits, an
/// optional fraction and an optional exponent. `inf` and `nan` words are
/// kept so they still report as non-finite.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let rest = text[end..].to_ascii_lowercase();
    for word in ["infinity", "inf", "nan"] {
        if rest.starts_with(word) {
            return &text[..end + word.len()];
        }
    }

    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - end - 1;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return "";
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &text[..end]
}

/// Parse `raw`, falling back to `baseline` on any error.
pub fn coerce_parameter(raw: Option<&str>, baseline: f64) -> f64 {
    match parse_parameter(raw) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, baseline, "using baseline parameter");
            baseline
        }
    }
}

/// Raw, unvalidated parameter input as it arrives from a form or command
/// line.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawParameters<'a> {
    pub temperature: Option<&'a str>,
    pub co2: Option<&'a str>,
    pub deforestation_rate: Option<&'a str>,
}

/// Turn raw input into validated parameters, substituting baselines.
pub fn coerce_parameters(raw: RawParameters<'_>) -> SimulationParameters {
    SimulationParameters::new(
        coerce_parameter(raw.temperature, SimulationParameters::BASELINE_TEMPERATURE),
        coerce_parameter(raw.co2, SimulationParameters::BASELINE_CO2),
        coerce_parameter(
            raw.deforestation_rate,
            SimulationParameters::BASELINE_DEFORESTATION,
        ),
    )
}
