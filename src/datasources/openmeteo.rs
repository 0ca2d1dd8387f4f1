use crate::config::WeatherConfig;
use crate::error::{FishOpsError, Result};
use crate::models::{Coordinates, DailySeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const MAX_BACKOFF_MS: u64 = 5000;

pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

// Open-Meteo response structures
#[derive(Debug, Deserialize)]
struct MarineResponse {
    daily: MarineDaily,
}

#[derive(Debug, Deserialize)]
struct MarineDaily {
    time: Vec<String>,
    #[serde(default)]
    wave_height_max: Vec<Option<f64>>,
    #[serde(default)]
    wind_wave_height_max: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: ForecastDaily,
}

#[derive(Debug, Deserialize)]
struct ForecastDaily {
    time: Vec<String>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}

impl OpenMeteoClient {
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn marine_url(&self, coords: &Coordinates) -> String {
        format!(
            "{}?latitude={:.2}&longitude={:.2}&daily=wave_height_max,wind_wave_height_max&timezone=auto",
            self.config.marine_url, coords.latitude, coords.longitude
        )
    }

    pub fn forecast_url(&self, coords: &Coordinates) -> String {
        format!(
            "{}?latitude={:.2}&longitude={:.2}&daily=precipitation_sum&timezone=auto",
            self.config.forecast_url, coords.latitude, coords.longitude
        )
    }

    /// Fetch daily wave, wind-wave and rainfall series for a location.
    pub async fn fetch_daily_series(&self, coords: &Coordinates) -> Result<DailySeries> {
        let marine = self.get_body(&self.marine_url(coords), "marine").await?;
        let forecast = self.get_body(&self.forecast_url(coords), "forecast").await?;

        let series = parse_daily_series(&marine, &forecast)?;
        tracing::debug!(days = series.len(), location = %coords, "Marine forecast fetched");
        Ok(series)
    }

    /// Test connection to the marine API
    pub async fn test_connection(&self, coords: &Coordinates) -> Result<bool> {
        let response = self
            .client
            .get(self.marine_url(coords))
            .send()
            .await
            .map_err(|e| FishOpsError::RemoteFetchFailure(format!("Open-Meteo: {}", e)))?;

        Ok(response.status().is_success())
    }

    async fn get_body(&self, url: &str, label: &str) -> Result<String> {
        let mut attempt: u32 = 0;
        loop {
            match self.get_body_once(url, label).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = backoff_delay(self.config.backoff_base_ms, attempt);
                    tracing::warn!(
                        "Open-Meteo {} request failed (attempt {}), retrying in {:?}: {}",
                        label,
                        attempt,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_body_once(&self, url: &str, label: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            FishOpsError::RemoteFetchFailure(format!("Open-Meteo {}: {}", label, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FishOpsError::RemoteFetchFailure(format!(
                "Open-Meteo {} returned {}: {}",
                label, status, body
            )));
        }

        response.text().await.map_err(|e| {
            FishOpsError::RemoteFetchFailure(format!(
                "Failed to read Open-Meteo {} response: {}",
                label, e
            ))
        })
    }
}

/// Linear backoff, capped.
pub fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    Duration::from_millis(base_ms.saturating_mul(attempt as u64).min(MAX_BACKOFF_MS))
}

/// Parse the two raw payloads into one series.
pub fn parse_daily_series(marine_body: &str, forecast_body: &str) -> Result<DailySeries> {
    let marine: MarineResponse = serde_json::from_str(marine_body)
        .map_err(|e| FishOpsError::RemoteFetchFailure(format!("marine payload: {}", e)))?;
    let forecast: ForecastResponse = serde_json::from_str(forecast_body)
        .map_err(|e| FishOpsError::RemoteFetchFailure(format!("forecast payload: {}", e)))?;
    join_series(marine, forecast)
}

fn join_series(marine: MarineResponse, forecast: ForecastResponse) -> Result<DailySeries> {
    let daily = marine.daily;
    let days = daily.time.len();
    if daily.wave_height_max.len() != days || daily.wind_wave_height_max.len() != days {
        return Err(FishOpsError::RemoteFetchFailure(format!(
            "marine series length mismatch: {} dates, {} wave, {} wind wave",
            days,
            daily.wave_height_max.len(),
            daily.wind_wave_height_max.len()
        )));
    }
    if forecast.daily.precipitation_sum.len() != forecast.daily.time.len() {
        return Err(FishOpsError::RemoteFetchFailure(format!(
            "rainfall series length mismatch: {} dates, {} values",
            forecast.daily.time.len(),
            forecast.daily.precipitation_sum.len()
        )));
    }

    let rain_by_date: HashMap<&str, f64> = forecast
        .daily
        .time
        .iter()
        .map(String::as_str)
        .zip(
            forecast
                .daily
                .precipitation_sum
                .iter()
                .map(|v| v.unwrap_or(0.0)),
        )
        .collect();

    let mut series = DailySeries::default();
    for (i, date) in daily.time.iter().enumerate() {
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
            FishOpsError::RemoteFetchFailure(format!("bad date '{}': {}", date, e))
        })?;
        series.dates.push(parsed);
        series
            .wave_height
            .push(daily.wave_height_max[i].unwrap_or(0.0));
        series
            .wind_wave_height
            .push(daily.wind_wave_height_max[i].unwrap_or(0.0));
        series
            .rainfall
            .push(rain_by_date.get(date.as_str()).copied().unwrap_or(0.0));
    }

    Ok(series)
}
