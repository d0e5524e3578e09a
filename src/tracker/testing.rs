//! Scripted [`TrackerApi`] for tests

use super::client::TrackerApi;
use super::error::FetchError;
use crate::types::{PositionFix, Visibility};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
struct Script {
    positions: VecDeque<(f64, f64)>,
    fail_position: bool,
    fail_timezone: bool,
    delay: Duration,
    last_timezone_query: Option<(f64, f64)>,
}

/// Answers every lookup from a script; defaults to a fixed London fix
#[derive(Default)]
pub struct FakeApi {
    script: Mutex<Script>,
    position_calls: AtomicUsize,
    timezone_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_position(&self, latitude: f64, longitude: f64) {
        self.script.lock().unwrap().positions.push_back((latitude, longitude));
    }

    pub fn fail_next_position(&self) {
        self.script.lock().unwrap().fail_position = true;
    }

    pub fn fail_next_timezone(&self) {
        self.script.lock().unwrap().fail_timezone = true;
    }

    /// Delay applied to every position lookup
    pub fn set_delay(&self, delay: Duration) {
        self.script.lock().unwrap().delay = delay;
    }

    pub fn position_calls(&self) -> usize {
        self.position_calls.load(Ordering::SeqCst)
    }

    pub fn timezone_calls(&self) -> usize {
        self.timezone_calls.load(Ordering::SeqCst)
    }

    pub fn last_timezone_query(&self) -> Option<(f64, f64)> {
        self.script.lock().unwrap().last_timezone_query
    }
}

pub fn london_fix() -> PositionFix {
    PositionFix {
        latitude: 51.5,
        longitude: -0.1,
        altitude: Some(420.0),
        velocity: Some(27600.0),
        visibility: Some(Visibility::Daylight),
        footprint: None,
        timestamp: None,
    }
}

#[async_trait]
impl TrackerApi for FakeApi {
    async fn satellite_position(&self) -> Result<PositionFix, FetchError> {
        self.position_calls.fetch_add(1, Ordering::SeqCst);

        let (delay, fail, next) = {
            let mut script = self.script.lock().unwrap();
            let fail = std::mem::take(&mut script.fail_position);
            (script.delay, fail, script.positions.pop_front())
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(FetchError::InvalidPayload("scripted failure".into()));
        }

        let mut fix = london_fix();
        if let Some((latitude, longitude)) = next {
            fix.latitude = latitude;
            fix.longitude = longitude;
        }
        Ok(fix)
    }

    async fn timezone(&self, latitude: f64, longitude: f64) -> Result<String, FetchError> {
        self.timezone_calls.fetch_add(1, Ordering::SeqCst);

        let mut script = self.script.lock().unwrap();
        script.last_timezone_query = Some((latitude, longitude));
        if std::mem::take(&mut script.fail_timezone) {
            return Err(FetchError::InvalidPayload("scripted failure".into()));
        }
        Ok("Europe/London".into())
    }
}
