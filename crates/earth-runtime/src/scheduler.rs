//! Timer that drives automatic rotation through the catalog.

use crate::session::SessionEvent;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Sends a [`SessionEvent::RotationTick`] every period until stopped.
///
/// The first tick fires one full period after start. Dropping the scheduler
/// aborts its task.
#[derive(Debug)]
pub struct RotationScheduler {
    period: Duration,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl RotationScheduler {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(5);

    /// Spawn the timer task on the current Tokio runtime. A zero period is
    /// raised to one millisecond.
    pub fn start(period: Duration, events: mpsc::Sender<SessionEvent>) -> Self {
        let period = period.max(Duration::from_millis(1));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        // A full queue must not block shutdown.
                        tokio::select! {
                            _ = &mut shutdown_rx => break,
                            sent = events.send(SessionEvent::RotationTick) => {
                                if sent.is_err() {
                                    debug!("session gone, rotation timer exiting");
                                    break;
                                }
                            }
                        }
                    }
                }
            }
        });
        info!(period_ms = period.as_millis() as u64, "rotation scheduler started");
        RotationScheduler {
            period,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the timer and wait for its task to exit. Idempotent.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
            info!("rotation scheduler stopped");
        }
    }
}

impl Drop for RotationScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_every_period_and_stops() {
        let (tx, mut rx) = mpsc::channel(8);
        let start = Instant::now();
        let mut sched = RotationScheduler::start(Duration::from_secs(5), tx);
        assert!(sched.is_running());

        assert!(matches!(rx.recv().await, Some(SessionEvent::RotationTick)));
        assert!(start.elapsed() >= Duration::from_secs(5));
        assert!(matches!(rx.recv().await, Some(SessionEvent::RotationTick)));
        assert!(start.elapsed() >= Duration::from_secs(10));

        sched.stop().await;
        assert!(!sched.is_running());
        // The task dropped its sender, so the channel closes.
        assert!(rx.recv().await.is_none());
        sched.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_the_timer() {
        let (tx, mut rx) = mpsc::channel(8);
        let sched = RotationScheduler::start(Duration::from_secs(5), tx);
        drop(sched);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn exits_when_receiver_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        let mut sched = RotationScheduler::start(Duration::from_millis(10), tx);
        drop(rx);
        time::sleep(Duration::from_millis(50)).await;
        assert!(!sched.is_running());
        sched.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_returns_while_queue_is_full() {
        let (tx, mut rx) = mpsc::channel(1);
        let mut sched = RotationScheduler::start(Duration::from_millis(10), tx);
        // Nobody drains: the second tick blocks on a full queue.
        time::sleep(Duration::from_millis(100)).await;
        assert!(sched.is_running());

        time::timeout(Duration::from_secs(1), sched.stop())
            .await
            .expect("stop must not wait on a blocked send");
        assert!(!sched.is_running());
        assert!(matches!(rx.recv().await, Some(SessionEvent::RotationTick)));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_is_clamped() {
        let (tx, _rx) = mpsc::channel(1);
        let mut sched = RotationScheduler::start(Duration::ZERO, tx);
        assert_eq!(sched.period(), Duration::from_millis(1));
        sched.stop().await;
    }
}
