#![deny(warnings)]

//! Time-series pipeline for the historical climate chart.
//!
//! Generates the synthetic yearly series behind an injectable
//! [`NoiseSource`], and owns the chart feed: seeding the renderer,
//! relaying parameter updates, and accepting optional external series.

pub mod chart;
pub mod history;
pub mod noise;

pub use chart::{validate_series, ChartPipeline, FeedError, SeriesSource};
pub use history::{
    generate_historical_data, generate_historical_data_with, FieldTrend, HistoryConfig,
};
pub use noise::{FixedNoise, NoNoise, NoiseSource, SeededNoise};
