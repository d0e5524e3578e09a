//! Tracker screen state
//!
//! [`TrackerState`] owns the latest [`PositionSample`] and applies poller
//! events to it. [`TrackerScreen`] ties the state to a running [`Poller`];
//! creating one mounts the screen, dropping it unmounts.

use super::client::TrackerApi;
use super::poller::{PollEvent, Poller, PollerSettings};
use crate::types::{PositionSample, FETCH_FAILED_MESSAGE};
use crate::ui::animation::EntryAnimation;
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedReceiver;

/// What the info panel should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    /// No cycle has finished yet
    Acquiring,
    Data,
    Error,
}

#[derive(Debug, Default)]
pub struct TrackerState {
    pub sample: PositionSample,
    /// Entry animation of the info panel, restarted on each transition to data
    pub entry: Option<EntryAnimation>,
    pub last_fix_at: Option<DateTime<Local>>,
    /// Diameter of the visibility footprint from the last fix, in km
    pub footprint: Option<f64>,
    pub successful_cycles: u64,
    pub failed_cycles: u64,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel_mode(&self) -> PanelMode {
        if self.sample.error_message.is_some() {
            PanelMode::Error
        } else if self.successful_cycles == 0 && self.last_fix_at.is_none() {
            PanelMode::Acquiring
        } else {
            PanelMode::Data
        }
    }

    /// Fold one poller event into the state
    pub fn apply(&mut self, event: PollEvent, now: Instant) {
        match event {
            PollEvent::Position { fix, .. } => {
                let was_showing_data = self.panel_mode() == PanelMode::Data;
                self.sample.apply_fix(&fix);
                self.footprint = fix.footprint;
                self.last_fix_at = Some(
                    fix.timestamp
                        .map(|ts| ts.with_timezone(&Local))
                        .unwrap_or_else(Local::now),
                );
                if !was_showing_data {
                    self.entry = Some(EntryAnimation::starting_at(now));
                }
            }
            PollEvent::Timezone { timezone_id, .. } => {
                self.sample.timezone_id = Some(timezone_id);
                self.successful_cycles += 1;
            }
            PollEvent::Failed { cycle, reason } => {
                tracing::warn!("Poll cycle {} failed: {}", cycle, reason);
                self.sample.error_message = Some(FETCH_FAILED_MESSAGE.to_string());
                self.failed_cycles += 1;
            }
        }
    }
}

/// A mounted tracker screen: state plus the poller feeding it
pub struct TrackerScreen {
    pub state: TrackerState,
    pub mounted_at: Instant,
    poller: Poller,
    events: UnboundedReceiver<PollEvent>,
}

impl TrackerScreen {
    /// Mount: fresh state, poller started (first cycle fires immediately)
    pub fn mount(api: Arc<dyn TrackerApi>, settings: PollerSettings) -> Self {
        let (poller, events) = Poller::spawn(api, settings);
        tracing::debug!("Tracker mounted");
        Self {
            state: TrackerState::new(),
            mounted_at: Instant::now(),
            poller,
            events,
        }
    }

    /// Apply every event that has arrived since the last call
    pub fn pump(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.state.apply(event, now);
            applied += 1;
        }
        applied
    }

    /// Ask for an extra cycle; `false` if one is already running and overlap is off
    pub fn refresh(&self) -> bool {
        self.poller.refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::testing::{london_fix, FakeApi};
    use crate::types::PositionFix;
    use std::time::Duration;

    fn position(cycle: u64, fix: PositionFix) -> PollEvent {
        PollEvent::Position { cycle, fix }
    }

    fn timezone(cycle: u64, id: &str) -> PollEvent {
        PollEvent::Timezone { cycle, timezone_id: id.into() }
    }

    fn failed(cycle: u64) -> PollEvent {
        PollEvent::Failed { cycle, reason: "connection refused".into() }
    }

    #[test]
    fn test_initial_state_is_zero() {
        let state = TrackerState::new();
        assert_eq!(state.sample, PositionSample::default());
        assert_eq!(state.panel_mode(), PanelMode::Acquiring);
    }

    #[test]
    fn test_successful_cycle_updates_sample() {
        let mut state = TrackerState::new();
        let now = Instant::now();

        state.apply(position(1, london_fix()), now);
        state.apply(timezone(1, "Europe/London"), now);

        assert_eq!(state.panel_mode(), PanelMode::Data);
        assert_eq!(state.sample.latitude, 51.5);
        assert_eq!(state.sample.longitude, -0.1);
        assert_eq!(state.sample.timezone_id.as_deref(), Some("Europe/London"));
        assert_eq!(state.successful_cycles, 1);
        assert!(state.entry.is_some());
    }

    #[test]
    fn test_failure_keeps_last_coordinates() {
        let mut state = TrackerState::new();
        let now = Instant::now();
        state.apply(position(1, london_fix()), now);
        state.apply(timezone(1, "Europe/London"), now);

        state.apply(failed(2), now);

        assert_eq!(state.panel_mode(), PanelMode::Error);
        assert_eq!(state.sample.error_message.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(state.sample.latitude, 51.5);
        assert_eq!(state.sample.longitude, -0.1);
    }

    #[test]
    fn test_failure_before_first_fix_keeps_zero() {
        let mut state = TrackerState::new();
        state.apply(failed(1), Instant::now());

        assert_eq!(state.panel_mode(), PanelMode::Error);
        assert_eq!(state.sample.latitude, 0.0);
        assert_eq!(state.sample.longitude, 0.0);
    }

    #[test]
    fn test_next_success_clears_error() {
        let mut state = TrackerState::new();
        let start = Instant::now();
        state.apply(failed(1), start);

        let later = start + Duration::from_secs(10);
        let mut fix = london_fix();
        fix.latitude = 10.0;
        state.apply(position(2, fix), later);
        state.apply(timezone(2, "Asia/Kolkata"), later);

        assert_eq!(state.panel_mode(), PanelMode::Data);
        assert!(state.sample.error_message.is_none());
        assert_eq!(state.sample.latitude, 10.0);
        assert_eq!(state.failed_cycles, 1);
        assert_eq!(state.successful_cycles, 1);
    }

    #[test]
    fn test_entry_animation_only_on_transition() {
        let mut state = TrackerState::new();
        let start = Instant::now();
        state.apply(position(1, london_fix()), start);
        state.apply(timezone(1, "Europe/London"), start);
        let first = state.entry.expect("animation after first fix");

        let later = start + Duration::from_secs(10);
        state.apply(position(2, london_fix()), later);
        assert_eq!(state.entry.unwrap(), first);

        state.apply(failed(3), later);
        let after_error = later + Duration::from_secs(10);
        state.apply(position(4, london_fix()), after_error);
        assert_ne!(state.entry.unwrap(), first);
    }

    #[tokio::test(start_paused = true)]
    async fn test_screen_mount_pumps_events() {
        let api = Arc::new(FakeApi::new());
        let mut screen = TrackerScreen::mount(api.clone(), PollerSettings {
            interval: Duration::from_secs(10),
            allow_overlap: true,
        });

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(screen.pump(Instant::now()), 2);
        assert_eq!(screen.state.sample.timezone_id.as_deref(), Some("Europe/London"));

        drop(screen);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(api.position_calls(), 1);
    }
}
