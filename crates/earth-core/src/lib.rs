#![deny(warnings)]

//! Core domain model for Connected Earth.
//!
//! This crate defines the Earth-system catalog, the interaction graph that
//! derives active connections and highlights from the current selection,
//! the geometry used to draw edges, the story chapters, and the
//! [`RenderSink`] seam through which read-only views reach the UI.

pub mod catalog;
pub mod geometry;
pub mod graph;
pub mod model;
pub mod render;
pub mod story;

pub use catalog::{default_catalog, Catalog, CatalogError, EarthSystem};
pub use geometry::{connection_style, ConnectionStyle, NODE_CENTER_OFFSET};
pub use graph::{next_rotation_index, Connection, ConnectionView, GraphSnapshot, InteractionGraph};
pub use model::{
    HistoricalDataPoint, ImpactMetric, MissionInfo, Position, SimulationParameters, StaticImpact,
    SystemId,
};
pub use render::{NullSink, RenderSink, TracingSink};
pub use story::{default_stories, Story, StoryNavigator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_parameters() {
        let p = SimulationParameters::default();
        assert_eq!(p, SimulationParameters::new(1.5, 421.0, 15.0));
        let broken = SimulationParameters::new(f64::NAN, f64::INFINITY, 3.0);
        assert_eq!(broken.sanitized(), SimulationParameters::new(1.5, 421.0, 3.0));
    }

    #[test]
    fn parameters_deserialize_with_defaults() {
        let p: SimulationParameters = serde_json::from_str(r#"{"co2": 500}"#).unwrap();
        assert_eq!(p, SimulationParameters::new(1.5, 500.0, 15.0));
    }

    #[test]
    fn historical_point_omits_missing_series() {
        let p = HistoricalDataPoint::temperature_only(1990, 14.4);
        let s = serde_json::to_string(&p).unwrap();
        assert_eq!(s, r#"{"year":1990,"temperature":14.4}"#);
        let back: HistoricalDataPoint = serde_json::from_str(&s).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn snapshot_serializes_for_renderers() {
        let mut g = InteractionGraph::new(default_catalog());
        let snap = g.select(Some(&SystemId::from("agriculture")));
        let v = serde_json::to_value(&snap).unwrap();
        assert_eq!(v["selected"], "agriculture");
        assert_eq!(v["connections"].as_array().unwrap().len(), 3);
        assert_eq!(v["connections"][0]["to"], "water");
    }
}
