//! User Interface layer
//!
//! This module contains all UI-related code:
//! - Theme definitions and colors
//! - Reusable widgets and entrance animations
//! - Tab-specific views (Home, Tracker, About)
//! - Main render entry point

pub mod about;
pub mod animation;
pub mod home;
pub mod render;
pub mod starfield;
pub mod theme;
pub mod tracker;
pub mod widgets;

pub use render::render;
pub use theme::Theme;
