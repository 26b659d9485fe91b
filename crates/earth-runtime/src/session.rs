//! In-memory session: the single owner of all mutable interaction state.

use crate::config::SessionConfig;
use data_pipeline::{
    generate_historical_data_with, ChartPipeline, FeedError, NoiseSource, SeededNoise,
    SeriesSource,
};
use earth_core::{
    Catalog, GraphSnapshot, HistoricalDataPoint, ImpactMetric, InteractionGraph, RenderSink,
    SimulationParameters, StoryNavigator, SystemId,
};
use earth_sim::{calculate_impacts_for, coerce_parameters, RawParameters};
use serde::Serialize;
use tracing::{debug, info};

/// Everything that can happen to a session. Events are applied one at a
/// time, each to completion.
#[derive(Debug)]
pub enum SessionEvent {
    /// Select a system, or clear the selection.
    Select(Option<SystemId>),
    SetParameters(SimulationParameters),
    /// Periodic tick from the rotation scheduler.
    RotationTick,
    NextStory,
    PreviousStory,
    /// Completion of an external historical-data fetch.
    FeedCompleted(Result<Vec<HistoricalDataPoint>, FeedError>),
    Shutdown,
}

/// Serializable read-only view of a whole session.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub graph: GraphSnapshot,
    pub parameters: SimulationParameters,
    pub impacts: Vec<ImpactMetric>,
    pub story_index: usize,
    pub story_title: Option<String>,
    pub series_source: SeriesSource,
    pub series_points: usize,
    pub ticks: u64,
}

impl SessionSnapshot {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub struct Session<S: RenderSink> {
    graph: InteractionGraph,
    parameters: SimulationParameters,
    impacts: Vec<ImpactMetric>,
    chart: ChartPipeline,
    stories: StoryNavigator,
    ticks: u64,
    sink: S,
}

impl<S: RenderSink> Session<S> {
    /// Start a session, drawing jitter from the configured seed or from
    /// entropy.
    pub fn new(catalog: Catalog, config: &SessionConfig, sink: S) -> Self {
        let mut noise = match config.rng_seed {
            Some(seed) => SeededNoise::new(seed),
            None => SeededNoise::from_entropy(),
        };
        Session::with_noise(catalog, config, sink, &mut noise)
    }

    /// Start a session with an explicit noise source.
    ///
    /// Startup computes the initial impacts, seeds the chart and, when
    /// configured, selects the first catalog entry.
    pub fn with_noise(
        catalog: Catalog,
        config: &SessionConfig,
        sink: S,
        noise: &mut dyn NoiseSource,
    ) -> Self {
        let parameters = config.parameters.sanitized();
        let series = generate_historical_data_with(&config.history, noise);
        let mut session = Session {
            graph: InteractionGraph::new(catalog),
            parameters,
            impacts: calculate_impacts_for(&parameters),
            chart: ChartPipeline::new(series),
            stories: StoryNavigator::default(),
            ticks: 0,
            sink,
        };
        session.sink.render_impacts(&session.impacts);
        session.chart.seed(&mut session.sink);
        if let Some(story) = session.stories.current() {
            session.sink.render_story(story);
        }
        if config.auto_select_first && !session.graph.catalog().is_empty() {
            session.select_index(Some(0));
        }
        info!(
            systems = session.graph.catalog().len(),
            selected = ?session.graph.selected().map(|s| s.id.as_str()),
            "session started"
        );
        session
    }

    pub fn select(&mut self, id: Option<&SystemId>) -> GraphSnapshot {
        let snapshot = self.graph.select(id);
        self.sink.render_selection(&snapshot);
        snapshot
    }

    pub fn select_index(&mut self, index: Option<usize>) -> GraphSnapshot {
        let snapshot = self.graph.select_index(index);
        self.sink.render_selection(&snapshot);
        snapshot
    }

    /// One scheduler tick: advance to the next system if one is selected.
    pub fn rotate(&mut self) -> Option<GraphSnapshot> {
        self.ticks += 1;
        let snapshot = self.graph.rotate();
        match &snapshot {
            Some(s) => {
                debug!(tick = self.ticks, selected = ?s.selected.as_ref().map(|i| i.as_str()), "rotated");
                self.sink.render_selection(s);
            }
            None => debug!(tick = self.ticks, "nothing selected, rotation skipped"),
        }
        snapshot
    }

    /// Replace the parameters, recompute impacts and notify the chart.
    /// Non-finite values fall back to their baselines.
    pub fn set_parameters(&mut self, parameters: SimulationParameters) -> &[ImpactMetric] {
        self.parameters = parameters.sanitized();
        self.impacts = calculate_impacts_for(&self.parameters);
        self.sink.render_impacts(&self.impacts);
        self.chart.update_chart(&self.parameters, &mut self.sink);
        debug!(parameters = ?self.parameters, "simulation updated");
        &self.impacts
    }

    /// [`Self::set_parameters`] from unvalidated text input.
    pub fn set_raw_parameters(&mut self, raw: RawParameters<'_>) -> &[ImpactMetric] {
        self.set_parameters(coerce_parameters(raw))
    }

    pub fn next_story(&mut self) -> bool {
        let moved = self.stories.next_chapter();
        if moved {
            self.render_story();
        }
        moved
    }

    pub fn previous_story(&mut self) -> bool {
        let moved = self.stories.previous_chapter();
        if moved {
            self.render_story();
        }
        moved
    }

    /// Apply the result of an external fetch. Failures are logged and leave
    /// the session unchanged.
    pub fn accept_feed(&mut self, result: Result<Vec<HistoricalDataPoint>, FeedError>) -> bool {
        self.chart.accept_feed_or_keep(result, &mut self.sink)
    }

    /// Apply one event. Returns false once the session should stop.
    pub fn handle(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Select(id) => {
                self.select(id.as_ref());
            }
            SessionEvent::SetParameters(p) => {
                self.set_parameters(p);
            }
            SessionEvent::RotationTick => {
                self.rotate();
            }
            SessionEvent::NextStory => {
                self.next_story();
            }
            SessionEvent::PreviousStory => {
                self.previous_story();
            }
            SessionEvent::FeedCompleted(result) => {
                self.accept_feed(result);
            }
            SessionEvent::Shutdown => {
                info!(ticks = self.ticks, "session shutting down");
                return false;
            }
        }
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            graph: self.graph.snapshot(),
            parameters: self.parameters,
            impacts: self.impacts.clone(),
            story_index: self.stories.index(),
            story_title: self.stories.current().map(|s| s.title.clone()),
            series_source: self.chart.source(),
            series_points: self.chart.series().len(),
            ticks: self.ticks,
        }
    }

    pub fn graph(&self) -> &InteractionGraph {
        &self.graph
    }

    pub fn parameters(&self) -> SimulationParameters {
        self.parameters
    }

    pub fn impacts(&self) -> &[ImpactMetric] {
        &self.impacts
    }

    pub fn chart(&self) -> &ChartPipeline {
        &self.chart
    }

    pub fn stories(&self) -> &StoryNavigator {
        &self.stories
    }

    /// Scheduler ticks handled so far, including skipped ones.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn render_story(&mut self) {
        if let Some(story) = self.stories.current() {
            self.sink.render_story(story);
        }
    }
}
