//! One fetch cycle: both providers, joined before anything is classified.

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    model::{Conditions, ConditionsRequest, Coordinates},
    provider::{SunDataProvider, WeatherProvider},
};

/// The only failure class: either provider could not deliver its record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("sun data fetch failed: {0}")]
    SunData(String),

    #[error("weather fetch failed: {0}")]
    Weather(String),
}

/// A fetch the session asked for. `generation` identifies it when the result comes back.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub generation: u64,
    pub request: ConditionsRequest,
}

impl FetchTicket {
    pub fn new(generation: u64, coordinates: Coordinates, date: NaiveDate) -> Self {
        Self { generation, request: ConditionsRequest { coordinates, date } }
    }
}

/// Run both requests concurrently and return the pair only if both succeed.
pub async fn fetch_conditions(
    sun: &dyn SunDataProvider,
    weather: &dyn WeatherProvider,
    ticket: &FetchTicket,
) -> Result<Conditions, FetchError> {
    let request = &ticket.request;

    let sun_fut = async {
        sun.get_sun_data(request)
            .await
            .map_err(|e| FetchError::SunData(format!("{e:#}")))
    };
    let weather_fut = async {
        weather
            .get_weather(request)
            .await
            .map_err(|e| FetchError::Weather(format!("{e:#}")))
    };

    match tokio::try_join!(sun_fut, weather_fut) {
        Ok((sun, weather)) => {
            tracing::debug!(generation = ticket.generation, "fetch cycle complete");
            Ok(Conditions { sun, weather })
        }
        Err(err) => {
            tracing::error!(generation = ticket.generation, error = %err, "Error fetching data");
            Err(err)
        }
    }
}
