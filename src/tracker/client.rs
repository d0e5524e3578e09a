//! HTTP client for the wheretheiss.at tracking API
//!
//! Two endpoints are used:
//! - `GET /v1/satellites/{id}` for the current position
//! - `GET /v1/coordinates/{lat},{lon}` for the timezone under a point

use super::error::FetchError;
use crate::config::ApiConfig;
use crate::types::{PositionFix, Visibility};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Source of ISS telemetry used by the poller
#[async_trait]
pub trait TrackerApi: Send + Sync + 'static {
    /// Fetch the current satellite position
    async fn satellite_position(&self) -> Result<PositionFix, FetchError>;

    /// Look up the timezone identifier for a coordinate pair
    async fn timezone(&self, latitude: f64, longitude: f64) -> Result<String, FetchError>;
}

/// Raw satellite endpoint payload
#[derive(Debug, Deserialize)]
pub struct SatelliteResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub velocity: Option<f64>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub footprint: Option<f64>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SatelliteResponse {
    /// Validate and convert into a position fix
    pub fn into_fix(self) -> Result<PositionFix, FetchError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(FetchError::InvalidPayload(format!(
                "latitude {} out of range",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(FetchError::InvalidPayload(format!(
                "longitude {} out of range",
                self.longitude
            )));
        }

        Ok(PositionFix {
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude.filter(|v| v.is_finite()),
            velocity: self.velocity.filter(|v| v.is_finite()),
            visibility: self.visibility,
            footprint: self.footprint.filter(|v| v.is_finite()),
            timestamp: self.timestamp,
        })
    }
}

/// Raw coordinates endpoint payload (only the field we use)
#[derive(Debug, Deserialize)]
pub struct CoordinatesResponse {
    #[serde(default)]
    pub timezone_id: Option<String>,
}

/// reqwest-backed client for api.wheretheiss.at
#[derive(Debug, Clone)]
pub struct WhereTheIssClient {
    http: reqwest::Client,
    base_url: String,
    satellite_id: u32,
}

impl WhereTheIssClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            satellite_id: config.satellite_id,
        })
    }

    pub fn satellite_url(&self) -> String {
        format!("{}/v1/satellites/{}", self.base_url, self.satellite_id)
    }

    pub fn coordinates_url(&self, latitude: f64, longitude: f64) -> String {
        format!("{}/v1/coordinates/{},{}", self.base_url, latitude, longitude)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| FetchError::Request { url, source })
    }
}

#[async_trait]
impl TrackerApi for WhereTheIssClient {
    async fn satellite_position(&self) -> Result<PositionFix, FetchError> {
        let raw: SatelliteResponse = self.get_json(self.satellite_url()).await?;
        raw.into_fix()
    }

    async fn timezone(&self, latitude: f64, longitude: f64) -> Result<String, FetchError> {
        let raw: CoordinatesResponse = self
            .get_json(self.coordinates_url(latitude, longitude))
            .await?;
        // A point over open ocean may come back without a zone; shown as N/A
        Ok(raw.timezone_id.unwrap_or_default())
    }
}
