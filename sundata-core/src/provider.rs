use crate::{
    Config, ConditionsRequest, SunRecord, WeatherRecord,
    provider::{
        hypothetical_weather::HypotheticalWeatherProvider, sunrise_sunset::SunriseSunsetProvider,
    },
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod hypothetical_weather;
pub mod sunrise_sunset;

/// Source of sunrise, sunset, solar noon and day length for a date.
#[async_trait]
pub trait SunDataProvider: Send + Sync + Debug {
    async fn get_sun_data(&self, request: &ConditionsRequest) -> anyhow::Result<SunRecord>;
}

/// Source of the coarse weather tag and temperature for a date.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, request: &ConditionsRequest) -> anyhow::Result<WeatherRecord>;
}

/// Both providers, built from the same configuration.
#[derive(Debug)]
pub struct Providers {
    pub sun: Box<dyn SunDataProvider>,
    pub weather: Box<dyn WeatherProvider>,
}

/// Construct the HTTP providers described by `config`.
pub fn providers_from_config(config: &Config) -> anyhow::Result<Providers> {
    config.validate()?;

    let sun = SunriseSunsetProvider::new(config.sun.base_url.clone());
    let weather = HypotheticalWeatherProvider::new(
        config.weather.base_url.clone(),
        config.weather_api_key().map(str::to_owned),
    );

    Ok(Providers { sun: Box::new(sun), weather: Box::new(weather) })
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
