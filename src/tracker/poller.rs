//! Position poller
//!
//! Runs one fetch cycle immediately, then one per interval, until dropped.
//! Each cycle is a satellite position lookup followed by a timezone lookup
//! for the fresh coordinates. Results flow to the UI as [`PollEvent`]s.
//!
//! Dropping the [`Poller`] cancels the timer only. A cycle already in flight
//! runs to completion; its events go nowhere once the receiver is gone.

use super::client::TrackerApi;
use crate::config::PollerConfig;
use crate::types::PositionFix;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Output of a poll cycle, tagged with the cycle number that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// Step (a) succeeded
    Position { cycle: u64, fix: PositionFix },
    /// Step (b) succeeded; the cycle is complete
    Timezone { cycle: u64, timezone_id: String },
    /// Either step failed; the rest of the cycle was skipped
    Failed { cycle: u64, reason: String },
}

/// Poller timing and overlap settings
#[derive(Debug, Clone, Copy)]
pub struct PollerSettings {
    pub interval: Duration,
    pub allow_overlap: bool,
}

impl From<&PollerConfig> for PollerSettings {
    fn from(config: &PollerConfig) -> Self {
        Self {
            interval: config.interval(),
            allow_overlap: config.allow_overlap,
        }
    }
}

/// Handle to a running poll timer. Aborts the timer on drop.
pub struct Poller {
    timer: JoinHandle<()>,
    refresh: Arc<Notify>,
    in_flight: Arc<AtomicBool>,
    allow_overlap: bool,
}

impl Poller {
    /// Start polling. The first cycle begins right away.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        api: Arc<dyn TrackerApi>,
        settings: PollerSettings,
    ) -> (Self, UnboundedReceiver<PollEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let refresh = Arc::new(Notify::new());
        let in_flight = Arc::new(AtomicBool::new(false));

        tracing::info!(
            "Starting position poller (interval: {:?}, overlap: {})",
            settings.interval,
            settings.allow_overlap
        );

        let timer = tokio::spawn(run_timer(
            api,
            settings,
            tx,
            refresh.clone(),
            in_flight.clone(),
        ));

        let poller = Self {
            timer,
            refresh,
            in_flight,
            allow_overlap: settings.allow_overlap,
        };
        (poller, rx)
    }

    /// True while a cycle runs and overlapping cycles are not allowed
    pub fn is_busy(&self) -> bool {
        !self.allow_overlap && self.in_flight.load(Ordering::Acquire)
    }

    /// Request one extra cycle now, outside the regular cadence.
    ///
    /// Returns `false` when the request would be skipped by the in-flight guard.
    pub fn refresh(&self) -> bool {
        if self.is_busy() {
            tracing::debug!("Manual refresh ignored: cycle still in flight");
            return false;
        }
        self.refresh.notify_one();
        true
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        tracing::info!("Stopping position poller");
        self.timer.abort();
    }
}

async fn run_timer(
    api: Arc<dyn TrackerApi>,
    settings: PollerSettings,
    tx: UnboundedSender<PollEvent>,
    refresh: Arc<Notify>,
    in_flight: Arc<AtomicBool>,
) {
    let mut ticker = tokio::time::interval(settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut cycle: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = refresh.notified() => {
                tracing::debug!("Manual refresh requested");
            }
        }

        cycle += 1;

        if !settings.allow_overlap && in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("Skipping cycle {}: previous cycle still in flight", cycle);
            continue;
        }

        let api = api.clone();
        let tx = tx.clone();
        let guard = InFlight(in_flight.clone());
        tokio::spawn(async move {
            let _guard = guard;
            run_cycle(api.as_ref(), cycle, &tx).await;
        });
    }
}

/// Clears the in-flight flag when a cycle task ends, however it ends
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Run one fetch cycle and report each step.
///
/// Send errors are ignored: a closed channel means the screen unmounted.
pub async fn run_cycle(api: &dyn TrackerApi, cycle: u64, tx: &UnboundedSender<PollEvent>) {
    let fix = match api.satellite_position().await {
        Ok(fix) => fix,
        Err(e) => {
            tracing::error!("Error fetching location (cycle {}): {}", cycle, e);
            let _ = tx.send(PollEvent::Failed { cycle, reason: e.to_string() });
            return;
        }
    };

    let (latitude, longitude) = (fix.latitude, fix.longitude);
    tracing::debug!(
        "Cycle {}: ISS at {:.4}, {:.4}",
        cycle,
        latitude,
        longitude
    );
    let _ = tx.send(PollEvent::Position { cycle, fix });

    match api.timezone(latitude, longitude).await {
        Ok(timezone_id) => {
            let _ = tx.send(PollEvent::Timezone { cycle, timezone_id });
        }
        Err(e) => {
            tracing::error!("Error fetching timezone (cycle {}): {}", cycle, e);
            let _ = tx.send(PollEvent::Failed { cycle, reason: e.to_string() });
        }
    }
}
