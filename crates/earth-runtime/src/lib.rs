#![deny(warnings)]

//! Session runtime for Connected Earth.
//!
//! A [`Session`] owns all mutable interaction state. Input arrives as
//! [`SessionEvent`]s on a channel and is applied one event at a time by
//! [`run_event_loop`]; the [`RotationScheduler`] is just another producer on
//! that channel, so no state is ever shared between tasks.

pub mod config;
pub mod scheduler;
pub mod session;

pub use config::{ConfigError, SessionConfig};
pub use scheduler::RotationScheduler;
pub use session::{Session, SessionEvent, SessionSnapshot};

use data_pipeline::FeedError;
use earth_core::{HistoricalDataPoint, RenderSink, SimulationParameters, SystemId};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

/// The session's event loop has ended.
#[derive(Debug, Error, PartialEq)]
#[error("session closed")]
pub struct SessionClosed;

/// Cloneable producer of session events, handed to UI bindings and to
/// external data fetchers.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionEvent>,
}

impl SessionHandle {
    pub async fn send(&self, event: SessionEvent) -> Result<(), SessionClosed> {
        self.tx.send(event).await.map_err(|_| SessionClosed)
    }

    pub async fn select(&self, id: Option<SystemId>) -> Result<(), SessionClosed> {
        self.send(SessionEvent::Select(id)).await
    }

    pub async fn set_parameters(&self, params: SimulationParameters) -> Result<(), SessionClosed> {
        self.send(SessionEvent::SetParameters(params)).await
    }

    /// Completion callback for an external historical-data fetch.
    pub async fn complete_feed(
        &self,
        result: Result<Vec<HistoricalDataPoint>, FeedError>,
    ) -> Result<(), SessionClosed> {
        self.send(SessionEvent::FeedCompleted(result)).await
    }

    pub async fn shutdown(&self) -> Result<(), SessionClosed> {
        self.send(SessionEvent::Shutdown).await
    }

    /// Raw sender, e.g. for [`RotationScheduler::start`].
    pub fn sender(&self) -> mpsc::Sender<SessionEvent> {
        self.tx.clone()
    }
}

/// Create the event channel for one session.
pub fn session_channel(capacity: usize) -> (SessionHandle, mpsc::Receiver<SessionEvent>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (SessionHandle { tx }, rx)
}

/// Apply events until shutdown, until every producer is gone, or until
/// `max_ticks` scheduler ticks have been handled.
pub async fn run_event_loop<S: RenderSink>(
    session: &mut Session<S>,
    events: &mut mpsc::Receiver<SessionEvent>,
    max_ticks: Option<u64>,
) {
    while let Some(event) = events.recv().await {
        if !session.handle(event) {
            break;
        }
        if max_ticks.is_some_and(|max| session.ticks() >= max) {
            info!(ticks = session.ticks(), "tick limit reached");
            break;
        }
    }
}
