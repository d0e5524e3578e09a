//! Entrance animations
//!
//! A terminal stand-in for fade + slide: content starts dimmed and shifted
//! sideways, then eases into place.

use std::time::{Duration, Instant};

/// Default length of an entrance animation
pub const ENTRY_DURATION: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryAnimation {
    started_at: Instant,
    duration: Duration,
}

impl EntryAnimation {
    pub fn starting_at(started_at: Instant) -> Self {
        Self {
            started_at,
            duration: ENTRY_DURATION,
        }
    }

    /// Eased progress in `0.0..=1.0`
    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started_at);
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        // ease-out cubic
        1.0 - (1.0 - t).powi(3)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }

    /// Remaining slide distance in cells
    pub fn offset(&self, now: Instant, distance: u16) -> u16 {
        ((1.0 - self.progress(now)) * distance as f64).round() as u16
    }

    /// Content is drawn dimmed for the first part of the fade
    pub fn is_dimmed(&self, now: Instant) -> bool {
        self.progress(now) < 0.6
    }
}

/// Slide offset for an optional animation (none means settled)
pub fn slide_offset(animation: Option<&EntryAnimation>, now: Instant, distance: u16) -> u16 {
    animation.map(|a| a.offset(now, distance)).unwrap_or(0)
}
