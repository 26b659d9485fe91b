//! Linear warming scenario from today to the end of the century.

use serde::{Deserialize, Serialize};

/// First projected year.
pub const SCENARIO_START_YEAR: i32 = 2025;
/// Last projected year.
pub const SCENARIO_END_YEAR: i32 = 2100;
/// Years between projection points.
pub const SCENARIO_STEP_YEARS: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: i32,
    /// Warming reached by this year, in °C.
    pub temperature: f64,
    /// Sea level rise reached by this year, in mm.
    pub sea_level: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    /// Target warming at the end year.
    pub temperature: f64,
    pub timeline: Vec<ProjectionPoint>,
}

/// Ramp linearly from zero in the start year to `temperature` in the end
/// year, with sea level following at 3.3 mm per degree.
pub fn run_scenario(temperature: f64) -> ScenarioProjection {
    let span = f64::from(SCENARIO_END_YEAR - SCENARIO_START_YEAR);
    let timeline = (SCENARIO_START_YEAR..=SCENARIO_END_YEAR)
        .step_by(SCENARIO_STEP_YEARS)
        .map(|year| {
            let progress = f64::from(year - SCENARIO_START_YEAR) / span;
            ProjectionPoint {
                year,
                temperature: temperature * progress,
                sea_level: temperature * 3.3 * progress,
            }
        })
        .collect();
    ScenarioProjection {
        temperature,
        timeline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_spans_century_in_five_year_steps() {
        let s = run_scenario(3.0);
        assert_eq!(s.timeline.len(), 16);
        assert_eq!(s.timeline[0].year, 2025);
        assert_eq!(s.timeline[0].temperature, 0.0);
        let last = s.timeline.last().unwrap();
        assert_eq!(last.year, 2100);
        assert!((last.temperature - 3.0).abs() < 1e-12);
        assert!((last.sea_level - 9.9).abs() < 1e-9);
        assert!(s.timeline.windows(2).all(|w| w[1].year - w[0].year == 5));
    }

    #[test]
    fn zero_warming_is_flat() {
        let s = run_scenario(0.0);
        assert!(s.timeline.iter().all(|p| p.temperature == 0.0 && p.sea_level == 0.0));
    }
}
