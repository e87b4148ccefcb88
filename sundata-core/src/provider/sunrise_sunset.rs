use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use serde::Deserialize;

use crate::model::{ConditionsRequest, SunRecord};

use super::{SunDataProvider, truncate_body};

/// Client for the sunrise-sunset.org JSON API.
#[derive(Debug, Clone)]
pub struct SunriseSunsetProvider {
    base_url: String,
    http: Client,
}

impl SunriseSunsetProvider {
    pub fn new(base_url: String) -> Self {
        Self { base_url, http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct SsResults {
    sunrise: String,
    sunset: String,
    solar_noon: String,
    day_length: u32,
}

#[derive(Debug, Deserialize)]
struct SsResponse {
    /// An object on success; an empty string on most errors.
    #[serde(default)]
    results: serde_json::Value,
    status: String,
}

#[async_trait]
impl SunDataProvider for SunriseSunsetProvider {
    async fn get_sun_data(&self, request: &ConditionsRequest) -> Result<SunRecord> {
        let lat = request.coordinates.latitude.to_string();
        let lng = request.coordinates.longitude.to_string();
        let date = request.date_param();

        tracing::debug!(url = %self.base_url, %date, "requesting sun data");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lng", lng.as_str()),
                ("date", date.as_str()),
                ("formatted", "0"),
            ])
            .send()
            .await
            .context("Failed to send request to sunrise-sunset.org")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read sunrise-sunset.org response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "sunrise-sunset.org request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        parse_sun_response(&body)
    }
}

/// Parse a `formatted=0` response body into a [`SunRecord`].
pub fn parse_sun_response(body: &str) -> Result<SunRecord> {
    let parsed: SsResponse =
        serde_json::from_str(body).context("Failed to parse sunrise-sunset.org JSON")?;

    if parsed.status != "OK" {
        return Err(anyhow!("sunrise-sunset.org returned status '{}'", parsed.status));
    }

    let results: SsResults = serde_json::from_value(parsed.results)
        .context("sunrise-sunset.org response contained no usable results")?;

    Ok(SunRecord {
        sunrise: parse_instant("sunrise", &results.sunrise)?,
        sunset: parse_instant("sunset", &results.sunset)?,
        solar_noon: parse_instant("solar_noon", &results.solar_noon)?,
        day_length_seconds: results.day_length,
    })
}

fn parse_instant(field: &str, value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Invalid {field} timestamp '{value}' from sunrise-sunset.org"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAN_FRANCISCO_JAN_1: &str = r#"{
        "results": {
            "sunrise": "2024-01-01T15:25:17+00:00",
            "sunset": "2024-01-02T01:02:52+00:00",
            "solar_noon": "2024-01-01T20:14:05+00:00",
            "day_length": 34655,
            "civil_twilight_begin": "2024-01-01T14:57:07+00:00",
            "civil_twilight_end": "2024-01-02T01:31:02+00:00"
        },
        "status": "OK",
        "tzid": "UTC"
    }"#;

    #[test]
    fn parses_formatted_zero_response() {
        let record = parse_sun_response(SAN_FRANCISCO_JAN_1).unwrap();

        assert_eq!(record.sunrise.to_rfc3339(), "2024-01-01T15:25:17+00:00");
        assert_eq!(record.sunset.to_rfc3339(), "2024-01-02T01:02:52+00:00");
        assert_eq!(record.solar_noon.to_rfc3339(), "2024-01-01T20:14:05+00:00");
        assert_eq!(record.day_length_seconds, 34655);
        assert!(record.sunrise < record.sunset);
    }

    #[test]
    fn non_ok_status_is_an_error() {
        let body = r#"{"results": "", "status": "INVALID_DATE"}"#;
        let err = parse_sun_response(body).unwrap_err();
        assert!(err.to_string().contains("INVALID_DATE"));
    }

    #[test]
    fn ok_status_without_results_is_an_error() {
        let err = parse_sun_response(r#"{"status": "OK"}"#).unwrap_err();
        assert!(err.to_string().contains("no usable results"));
    }

    #[test]
    fn bad_timestamp_names_the_field() {
        let body = r#"{
            "results": {
                "sunrise": "7:27:02 AM",
                "sunset": "2024-01-02T01:02:52+00:00",
                "solar_noon": "2024-01-01T20:14:05+00:00",
                "day_length": 34655
            },
            "status": "OK"
        }"#;
        let err = parse_sun_response(body).unwrap_err();
        assert!(err.to_string().contains("sunrise"));
    }
}
