//! Core data types for isstrack
//!
//! This module defines the shared data structures used throughout the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder shown for any optional field the API did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed user-facing message for any failed poll cycle
pub const FETCH_FAILED_MESSAGE: &str = "Unable to fetch location";

/// Whether the ISS is currently in sunlight or in Earth's shadow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Visibility {
    Daylight,
    Eclipsed,
    Other(String),
}

impl Visibility {
    pub fn as_str(&self) -> &str {
        match self {
            Visibility::Daylight => "daylight",
            Visibility::Eclipsed => "eclipsed",
            Visibility::Other(s) => s,
        }
    }
}

impl From<String> for Visibility {
    fn from(s: String) -> Self {
        match s.as_str() {
            "daylight" => Visibility::Daylight,
            "eclipsed" => Visibility::Eclipsed,
            _ => Visibility::Other(s),
        }
    }
}

impl From<Visibility> for String {
    fn from(v: Visibility) -> Self {
        v.as_str().to_string()
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded answer from the satellite position endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFix {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub velocity: Option<f64>,
    pub visibility: Option<Visibility>,
    pub footprint: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// The latest orbital telemetry snapshot shown by the tracker screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionSample {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub velocity: Option<f64>,
    pub visibility: Option<Visibility>,
    pub timezone_id: Option<String>,
    pub error_message: Option<String>,
}

impl PositionSample {
    /// Replace the position fields with a fresh fix and clear any error.
    ///
    /// The timezone is left alone: it belongs to the lookup that follows.
    pub fn apply_fix(&mut self, fix: &PositionFix) {
        self.latitude = fix.latitude;
        self.longitude = fix.longitude;
        self.altitude = fix.altitude;
        self.velocity = fix.velocity;
        self.visibility = fix.visibility.clone();
        self.error_message = None;
    }

    pub fn formatted_latitude(&self) -> String {
        format!("Latitude: {:.6}°", self.latitude)
    }

    pub fn formatted_longitude(&self) -> String {
        format!("Longitude: {:.6}°", self.longitude)
    }

    pub fn formatted_altitude(&self) -> String {
        match self.altitude {
            Some(km) => format!("Altitude: {:.2} km", km),
            None => format!("Altitude: {}", NOT_AVAILABLE),
        }
    }

    pub fn formatted_velocity(&self) -> String {
        match self.velocity {
            Some(kmh) => format!("Velocity: {:.2} km/h", kmh),
            None => format!("Velocity: {}", NOT_AVAILABLE),
        }
    }

    pub fn formatted_timezone(&self) -> String {
        let tz = self
            .timezone_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NOT_AVAILABLE);
        format!("Timezone: {}", tz)
    }

    pub fn formatted_visibility(&self) -> String {
        let vis = self
            .visibility
            .as_ref()
            .map(Visibility::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(NOT_AVAILABLE);
        format!("Visibility: {}", vis)
    }

    /// All info panel rows, in display order
    pub fn panel_lines(&self) -> [String; 6] {
        [
            self.formatted_latitude(),
            self.formatted_longitude(),
            self.formatted_altitude(),
            self.formatted_velocity(),
            self.formatted_timezone(),
            self.formatted_visibility(),
        ]
    }
}

/// Application tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Tracker,
    About,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Tracker, Tab::About]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Tracker => 1,
            Tab::About => 2,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Tab::Home,
            1 => Tab::Tracker,
            2 => Tab::About,
            _ => Tab::Home,
        }
    }

    pub fn next(&self) -> Self {
        Self::from_index((self.index() + 1) % Self::all().len())
    }

    pub fn previous(&self) -> Self {
        let len = Self::all().len();
        Self::from_index((self.index() + len - 1) % len)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Tracker => "Where is ISS?",
            Tab::About => "Who is the creator?",
        }
    }
}
