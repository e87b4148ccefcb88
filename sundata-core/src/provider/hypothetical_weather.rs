use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{ConditionsRequest, WeatherRecord};

use super::{WeatherProvider, truncate_body};

/// Client for the forecast endpoint returning `{ "condition": .., "temperature": .. }`.
///
/// No such public service exists; point `base_url` at anything that speaks the shape.
#[derive(Debug, Clone)]
pub struct HypotheticalWeatherProvider {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl HypotheticalWeatherProvider {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self { base_url, api_key, http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct HwResponse {
    #[serde(default)]
    condition: Option<String>,
    temperature: f64,
}

#[async_trait]
impl WeatherProvider for HypotheticalWeatherProvider {
    async fn get_weather(&self, request: &ConditionsRequest) -> Result<WeatherRecord> {
        let lat = request.coordinates.latitude.to_string();
        let lng = request.coordinates.longitude.to_string();
        let date = request.date_param();

        let mut query = vec![("lat", lat.as_str()), ("lng", lng.as_str()), ("date", date.as_str())];
        if let Some(key) = self.api_key.as_deref() {
            query.push(("key", key));
        }

        tracing::debug!(url = %self.base_url, %date, "requesting weather");

        let res = self
            .http
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .context("Failed to send request to weather provider")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read weather provider response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        parse_weather_response(&body)
    }
}

/// Parse a forecast body. A missing or null `condition` is kept as empty text.
pub fn parse_weather_response(body: &str) -> Result<WeatherRecord> {
    let parsed: HwResponse =
        serde_json::from_str(body).context("Failed to parse weather provider JSON")?;

    Ok(WeatherRecord::new(parsed.condition.unwrap_or_default(), parsed.temperature))
}
