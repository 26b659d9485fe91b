//! Historical chart feed: seeds the renderer once, relays parameter updates,
//! and accepts optional external series.

use earth_core::{HistoricalDataPoint, RenderSink, SimulationParameters};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why an external series was not used.
#[derive(Debug, Error, PartialEq)]
pub enum FeedError {
    /// The remote source failed or timed out.
    #[error("feed unavailable: {0}")]
    Unavailable(String),
    /// The source answered with no points.
    #[error("feed returned no data")]
    Empty,
    /// Years must increase strictly from one point to the next.
    #[error("years not strictly increasing at point {0}")]
    Unordered(usize),
    /// Temperature or one of the optional series is NaN or infinite.
    #[error("non-finite value for year {0}")]
    NonFinite(i32),
}

/// Where the displayed series came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesSource {
    Synthetic,
    Feed,
}

/// Check that an external series can replace the synthetic one.
pub fn validate_series(series: &[HistoricalDataPoint]) -> Result<(), FeedError> {
    if series.is_empty() {
        return Err(FeedError::Empty);
    }
    for (i, p) in series.iter().enumerate() {
        let optional = [p.co2, p.sea_level, p.ice_extent, p.forest_cover];
        if !p.temperature.is_finite() || optional.iter().flatten().any(|v| !v.is_finite()) {
            return Err(FeedError::NonFinite(p.year));
        }
        if i > 0 && p.year <= series[i - 1].year {
            return Err(FeedError::Unordered(i));
        }
    }
    Ok(())
}

/// Owns the series shown on the chart.
#[derive(Clone, Debug)]
pub struct ChartPipeline {
    series: Vec<HistoricalDataPoint>,
    source: SeriesSource,
    seeded: bool,
}

impl ChartPipeline {
    /// Start from a synthetic series; nothing is rendered until [`Self::seed`].
    pub fn new(series: Vec<HistoricalDataPoint>) -> Self {
        ChartPipeline {
            series,
            source: SeriesSource::Synthetic,
            seeded: false,
        }
    }

    pub fn series(&self) -> &[HistoricalDataPoint] {
        &self.series
    }

    pub fn source(&self) -> SeriesSource {
        self.source
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Hand the series to the renderer. Later calls re-seed.
    pub fn seed(&mut self, sink: &mut dyn RenderSink) {
        sink.create_chart(&self.series);
        self.seeded = true;
        info!(points = self.series.len(), source = ?self.source, "chart seeded");
    }

    /// Tell the renderer new parameters are available. The series itself is
    /// not recomputed. Skipped until the chart has been seeded; returns
    /// whether the notification was sent.
    pub fn update_chart(&self, params: &SimulationParameters, sink: &mut dyn RenderSink) -> bool {
        if !self.seeded {
            debug!("chart not seeded yet, update skipped");
            return false;
        }
        sink.update_chart(params);
        true
    }

    /// Take the result of an external fetch.
    ///
    /// A valid series replaces the current one and re-seeds a chart that was
    /// already seeded. On error the pipeline is left untouched and the error
    /// is returned for the caller to report.
    pub fn accept_feed(
        &mut self,
        result: Result<Vec<HistoricalDataPoint>, FeedError>,
        sink: &mut dyn RenderSink,
    ) -> Result<usize, FeedError> {
        let series = result?;
        validate_series(&series)?;
        let n = series.len();
        self.series = series;
        self.source = SeriesSource::Feed;
        if self.seeded {
            self.seed(sink);
        }
        Ok(n)
    }

    /// [`Self::accept_feed`] that logs and swallows failures.
    pub fn accept_feed_or_keep(
        &mut self,
        result: Result<Vec<HistoricalDataPoint>, FeedError>,
        sink: &mut dyn RenderSink,
    ) -> bool {
        match self.accept_feed(result, sink) {
            Ok(points) => {
                info!(points, "external series accepted");
                true
            }
            Err(e) => {
                warn!(error = %e, source = ?self.source, "external series rejected, keeping current data");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{generate_historical_data_with, HistoryConfig};
    use crate::noise::NoNoise;
    use earth_core::{GraphSnapshot, ImpactMetric};

    #[derive(Default)]
    struct Recorder {
        charts: Vec<usize>,
        updates: Vec<SimulationParameters>,
    }

    impl RenderSink for Recorder {
        fn render_selection(&mut self, _snapshot: &GraphSnapshot) {}
        fn render_impacts(&mut self, _impacts: &[ImpactMetric]) {}
        fn create_chart(&mut self, series: &[HistoricalDataPoint]) {
            self.charts.push(series.len());
        }
        fn update_chart(&mut self, params: &SimulationParameters) {
            self.updates.push(*params);
        }
    }

    fn synthetic() -> ChartPipeline {
        ChartPipeline::new(generate_historical_data_with(&HistoryConfig::default(), &mut NoNoise))
    }

    fn feed(years: &[i32]) -> Vec<HistoricalDataPoint> {
        years
            .iter()
            .map(|&y| HistoricalDataPoint::temperature_only(y, 14.5))
            .collect()
    }

    #[test]
    fn updates_are_gated_on_seeding() {
        let mut chart = synthetic();
        let mut sink = Recorder::default();
        let p = SimulationParameters::default();
        assert!(!chart.update_chart(&p, &mut sink));
        assert!(sink.updates.is_empty());

        chart.seed(&mut sink);
        assert_eq!(sink.charts, vec![50]);
        assert!(chart.update_chart(&p, &mut sink));
        assert_eq!(sink.updates, vec![p]);
        // Parameters never touch the series.
        assert_eq!(chart.series().len(), 50);
    }

    #[test]
    fn valid_feed_replaces_series_and_reseeds() {
        let mut chart = synthetic();
        let mut sink = Recorder::default();
        chart.seed(&mut sink);
        let n = chart.accept_feed(Ok(feed(&[1880, 1881, 1882])), &mut sink).unwrap();
        assert_eq!(n, 3);
        assert_eq!(chart.source(), SeriesSource::Feed);
        assert_eq!(sink.charts, vec![50, 3]);
    }

    #[test]
    fn feed_before_seed_does_not_render() {
        let mut chart = synthetic();
        let mut sink = Recorder::default();
        assert!(chart.accept_feed_or_keep(Ok(feed(&[2000])), &mut sink));
        assert!(sink.charts.is_empty());
        assert_eq!(chart.series().len(), 1);
    }

    #[test]
    fn failures_leave_state_untouched() {
        let mut chart = synthetic();
        let mut sink = Recorder::default();
        chart.seed(&mut sink);
        let before = chart.series().to_vec();

        let cases = vec![
            (Err(FeedError::Unavailable("timeout".into())), FeedError::Unavailable("timeout".into())),
            (Ok(vec![]), FeedError::Empty),
            (Ok(feed(&[2001, 2000])), FeedError::Unordered(1)),
            (Ok(feed(&[2000, 2000])), FeedError::Unordered(1)),
            (
                Ok(vec![HistoricalDataPoint::temperature_only(1999, f64::NAN)]),
                FeedError::NonFinite(1999),
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(chart.accept_feed(input, &mut sink), Err(expected));
        }
        assert!(!chart.accept_feed_or_keep(Ok(vec![]), &mut sink));
        assert_eq!(chart.series(), before.as_slice());
        assert_eq!(chart.source(), SeriesSource::Synthetic);
        assert_eq!(sink.charts, vec![50]);
    }

    #[test]
    fn optional_series_must_be_finite() {
        let good = HistoricalDataPoint {
            co2: Some(410.0),
            sea_level: Some(90.0),
            ice_extent: Some(6.1),
            forest_cover: Some(30.9),
            ..HistoricalDataPoint::temperature_only(2019, 14.9)
        };
        assert_eq!(validate_series(std::slice::from_ref(&good)), Ok(()));

        let bad = [
            HistoricalDataPoint { co2: Some(f64::NAN), ..good.clone() },
            HistoricalDataPoint { sea_level: Some(f64::INFINITY), ..good.clone() },
            HistoricalDataPoint { ice_extent: Some(f64::NEG_INFINITY), ..good.clone() },
            HistoricalDataPoint { forest_cover: Some(f64::NAN), ..good.clone() },
        ];
        let mut chart = synthetic();
        let mut sink = Recorder::default();
        chart.seed(&mut sink);
        for point in bad {
            assert_eq!(
                chart.accept_feed(Ok(vec![point]), &mut sink),
                Err(FeedError::NonFinite(2019))
            );
        }
        assert_eq!(chart.source(), SeriesSource::Synthetic);
        assert_eq!(sink.charts, vec![50]);
    }

    #[test]
    fn source_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&SeriesSource::Feed).unwrap(), "\"feed\"");
    }
}
