//! ISS tracking layer
//!
//! This module handles everything behind the map screen:
//! - HTTP access to the tracking API
//! - The periodic position poller
//! - The state the map and info panel render from

pub mod client;
pub mod error;
pub mod poller;
pub mod state;

#[cfg(test)]
pub mod testing;

pub use client::{TrackerApi, WhereTheIssClient};
pub use poller::{run_cycle, PollerSettings};
pub use state::{PanelMode, TrackerScreen, TrackerState};
