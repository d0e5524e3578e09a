//! Configuration management for isstrack
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/isstrack/config.toml

use crate::content::Profile;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    pub layout: LayoutMode,
    pub api: ApiConfig,
    pub poller: PollerConfig,
    pub map: MapConfig,
    pub logging: LoggingConfig,
    pub about: Profile,
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("isstrack");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }
}

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Cosmic,
    Gruvbox,
    Nord,
    Transparent,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Cosmic => "Cosmic",
            ThemeName::Gruvbox => "Gruvbox",
            ThemeName::Nord => "Nord",
            ThemeName::Transparent => "Transparent",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Cosmic => ThemeName::Gruvbox,
            ThemeName::Gruvbox => ThemeName::Nord,
            ThemeName::Nord => ThemeName::Transparent,
            ThemeName::Transparent => ThemeName::Cosmic,
        }
    }
}

/// Layout of the tracker screen (map and info panel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    #[default]
    Auto,
    SideBySide,
    Stacked,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Auto => "Auto (responsive)",
            LayoutMode::SideBySide => "Side-by-side",
            LayoutMode::Stacked => "Stacked",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            LayoutMode::Auto => LayoutMode::SideBySide,
            LayoutMode::SideBySide => LayoutMode::Stacked,
            LayoutMode::Stacked => LayoutMode::Auto,
        }
    }
}

/// Tracking API endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub satellite_id: u32,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.wheretheiss.at".into(),
            satellite_id: 25544,
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Position poller settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    pub interval_secs: u64,
    /// Let a new cycle start while the previous one is still in flight
    pub allow_overlap: bool,
    /// Keep the tracker mounted (and polling) while other tabs are shown
    pub keep_alive: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            allow_overlap: true,
            keep_alive: false,
        }
    }
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// Coastline detail of the world map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MapDetail {
    Low,
    #[default]
    High,
}

/// Map viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Visible latitude range in degrees, centered on the ISS
    pub latitude_span: f64,
    /// Visible longitude range in degrees, centered on the ISS
    pub longitude_span: f64,
    pub resolution: MapDetail,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            latitude_span: 55.0,
            longitude_span: 75.0,
            resolution: MapDetail::High,
        }
    }
}

impl MapConfig {
    pub fn latitude_span(&self) -> f64 {
        sanitize_span(self.latitude_span, 180.0)
    }

    pub fn longitude_span(&self) -> f64 {
        sanitize_span(self.longitude_span, 360.0)
    }
}

fn sanitize_span(span: f64, max: f64) -> f64 {
    if span.is_finite() {
        span.clamp(1.0, max)
    } else {
        max
    }
}

/// Log file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub retention_days: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            retention_days: 3,
        }
    }
}

impl LoggingConfig {
    /// How long log files are kept. Huge day counts saturate instead of overflowing.
    pub fn retention(&self) -> Duration {
        const SECS_PER_DAY: u64 = 24 * 60 * 60;
        Duration::from_secs(self.retention_days.saturating_mul(SECS_PER_DAY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeName::Cosmic);
        assert_eq!(config.layout, LayoutMode::Auto);
        assert_eq!(config.api.satellite_id, 25544);
        assert_eq!(config.poller.interval(), Duration::from_secs(10));
        assert!(config.poller.allow_overlap);
        assert!(!config.poller.keep_alive);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
theme = "nord"
layout = "side-by-side"

[poller]
allow_overlap = false

[map]
latitude_span = 30.0
"#,
        )
        .unwrap();

        assert_eq!(config.theme, ThemeName::Nord);
        assert_eq!(config.layout, LayoutMode::SideBySide);
        assert!(!config.poller.allow_overlap);
        assert_eq!(config.poller.interval_secs, 10);
        assert_eq!(config.map.latitude_span(), 30.0);
        assert_eq!(config.map.longitude_span(), 75.0);
        assert_eq!(config.api.base_url, "https://api.wheretheiss.at");
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.api.satellite_id, config.api.satellite_id);
        assert_eq!(back.about.name, config.about.name);
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = std::env::temp_dir().join(format!("isstrack-config-test-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        let config = Config {
            theme: ThemeName::Gruvbox,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, ThemeName::Gruvbox);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_sanitized_values() {
        let poller = PollerConfig { interval_secs: 0, ..PollerConfig::default() };
        assert_eq!(poller.interval(), Duration::from_secs(1));

        let map = MapConfig {
            latitude_span: f64::NAN,
            longitude_span: 1000.0,
            resolution: MapDetail::Low,
        };
        assert_eq!(map.latitude_span(), 180.0);
        assert_eq!(map.longitude_span(), 360.0);
    }

    #[test]
    fn test_log_retention_saturates() {
        let logging = LoggingConfig::default();
        assert_eq!(logging.retention(), Duration::from_secs(3 * 86_400));

        let config: Config = toml::from_str(
            r#"
[logging]
retention_days = 9223372036854775807
"#,
        )
        .unwrap();
        assert_eq!(config.logging.retention_days, i64::MAX as u64);
        assert_eq!(config.logging.retention(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_theme_cycle() {
        let theme = ThemeName::Cosmic;
        assert_eq!(theme.next(), ThemeName::Gruvbox);
        assert_eq!(theme.next().next().next().next(), ThemeName::Cosmic);
    }
}
