//! Synthetic yearly climate series used to seed the chart.

use crate::noise::{NoiseSource, SeededNoise};
use earth_core::HistoricalDataPoint;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Linear trend with bounded positive jitter: `base + index * slope + [0, jitter)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldTrend {
    pub base: f64,
    /// Change per year; negative for declining series.
    pub slope: f64,
    /// Exclusive upper bound of the jitter.
    pub jitter: f64,
}

impl FieldTrend {
    /// Deterministic part of the value at `index`.
    pub fn trend_at(&self, index: usize) -> f64 {
        self.base + index as f64 * self.slope
    }

    pub fn sample(&self, index: usize, noise: &mut dyn NoiseSource) -> f64 {
        self.trend_at(index) + noise.sample(self.jitter)
    }
}

/// Global mean surface temperature, °C.
pub const TEMPERATURE: FieldTrend = FieldTrend {
    base: 14.0,
    slope: 0.022,
    jitter: 0.3,
};
/// CO₂ concentration, ppm.
pub const CO2: FieldTrend = FieldTrend {
    base: 325.0,
    slope: 1.9,
    jitter: 5.0,
};
/// Sea level change from the first year, mm.
pub const SEA_LEVEL: FieldTrend = FieldTrend {
    base: 0.0,
    slope: 3.3,
    jitter: 2.0,
};
/// Arctic sea ice extent, million km².
pub const ICE_EXTENT: FieldTrend = FieldTrend {
    base: 7.5,
    slope: -0.03,
    jitter: 0.5,
};
/// Forest cover, percent of land area.
pub const FOREST_COVER: FieldTrend = FieldTrend {
    base: 31.6,
    slope: -0.02,
    jitter: 0.3,
};

/// Shape of the generated series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Year of the first point.
    pub start_year: i32,
    /// Number of yearly points.
    pub points: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            start_year: 1970,
            points: 50,
        }
    }
}

/// Fifty yearly points from 1970 with fresh random jitter.
pub fn generate_historical_data() -> Vec<HistoricalDataPoint> {
    generate_historical_data_with(&HistoryConfig::default(), &mut SeededNoise::from_entropy())
}

/// Generate a series with an explicit shape and noise source.
pub fn generate_historical_data_with(
    config: &HistoryConfig,
    noise: &mut dyn NoiseSource,
) -> Vec<HistoricalDataPoint> {
    let series: Vec<HistoricalDataPoint> = (0..config.points)
        .map(|i| HistoricalDataPoint {
            year: config.start_year.saturating_add(i32::try_from(i).unwrap_or(i32::MAX)),
            temperature: TEMPERATURE.sample(i, noise),
            co2: Some(CO2.sample(i, noise)),
            sea_level: Some(SEA_LEVEL.sample(i, noise)),
            ice_extent: Some(ICE_EXTENT.sample(i, noise)),
            forest_cover: Some(FOREST_COVER.sample(i, noise)),
        })
        .collect();
    debug!(
        points = series.len(),
        start_year = config.start_year,
        "historical series generated"
    );
    series
}
