//! Seam to the rendering collaborator.
//!
//! The engine never draws anything itself. It pushes read-only views through
//! a [`RenderSink`] and the UI layer decides what to paint.

use crate::graph::GraphSnapshot;
use crate::model::{HistoricalDataPoint, ImpactMetric, SimulationParameters};
use crate::story::Story;
use tracing::info;

pub trait RenderSink {
    /// Selection, edges with styles, and highlight set changed.
    fn render_selection(&mut self, snapshot: &GraphSnapshot);

    /// A fresh impact list replaced the previous one.
    fn render_impacts(&mut self, impacts: &[ImpactMetric]);

    /// Seed (or re-seed) the historical chart.
    fn create_chart(&mut self, series: &[HistoricalDataPoint]);

    /// New parameters are available for display.
    fn update_chart(&mut self, params: &SimulationParameters);

    fn render_story(&mut self, _story: &Story) {}
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render_selection(&mut self, _snapshot: &GraphSnapshot) {}
    fn render_impacts(&mut self, _impacts: &[ImpactMetric]) {}
    fn create_chart(&mut self, _series: &[HistoricalDataPoint]) {}
    fn update_chart(&mut self, _params: &SimulationParameters) {}
}

/// Reports every render call as a structured log event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl RenderSink for TracingSink {
    fn render_selection(&mut self, snapshot: &GraphSnapshot) {
        info!(
            selected = ?snapshot.selected.as_ref().map(|s| s.as_str()),
            connections = snapshot.connections.len(),
            highlighted = ?snapshot.highlighted.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            "render selection"
        );
    }

    fn render_impacts(&mut self, impacts: &[ImpactMetric]) {
        for m in impacts {
            info!(label = %m.label, value = %m.value, "render impact");
        }
    }

    fn create_chart(&mut self, series: &[HistoricalDataPoint]) {
        info!(
            points = series.len(),
            first_year = ?series.first().map(|p| p.year),
            last_year = ?series.last().map(|p| p.year),
            "create chart"
        );
    }

    fn update_chart(&mut self, params: &SimulationParameters) {
        info!(
            temperature = params.temperature,
            co2 = params.co2,
            deforestation = params.deforestation_rate,
            "update chart"
        );
    }

    fn render_story(&mut self, story: &Story) {
        info!(title = %story.title, "render story");
    }
}
