//! Session state as a value: inputs, the latest fetch request, and its outcome.
//!
//! Every change goes through [`Session::transition`], which returns the next
//! session plus the fetch to run, if any. Completions carry the generation of
//! the ticket they answer; anything but the latest generation is dropped, so a
//! slow response for an old location or date cannot overwrite a newer one.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

use crate::{
    fetch::{FetchError, FetchTicket},
    format::{format_clock, humanize_duration},
    lighting::LightingCondition,
    model::{Conditions, Coordinates},
    tips::tip_for,
};

pub const LOADING_TEXT: &str = "Loading data...";

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LocationChanged(String),
    DateChanged(NaiveDate),
    FetchCompleted { generation: u64, outcome: Result<Conditions, FetchError> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No fetch requested yet.
    Idle,
    Loading { generation: u64 },
    Ready { generation: u64, conditions: Conditions },
    Failed { generation: u64, error: FetchError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    location: String,
    selected_date: NaiveDate,
    coordinates: Coordinates,
    last_generation: u64,
    phase: Phase,
}

/// Result of applying one [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: Session,
    pub fetch: Option<FetchTicket>,
}

impl Session {
    /// Empty location, `today` selected, nothing fetched.
    pub fn new(coordinates: Coordinates, today: NaiveDate) -> Self {
        Self {
            location: String::new(),
            selected_date: today,
            coordinates,
            last_generation: 0,
            phase: Phase::Idle,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Latest successfully fetched pair, if the current phase holds one.
    pub fn conditions(&self) -> Option<&Conditions> {
        match &self.phase {
            Phase::Ready { conditions, .. } => Some(conditions),
            _ => None,
        }
    }

    pub fn transition(self, event: Event) -> Transition {
        match event {
            Event::LocationChanged(location) => {
                if location == self.location {
                    return self.unchanged();
                }
                let next = Session { location, ..self };
                next.request_fetch()
            }
            Event::DateChanged(date) => {
                if date == self.selected_date {
                    return self.unchanged();
                }
                let next = Session { selected_date: date, ..self };
                next.request_fetch()
            }
            Event::FetchCompleted { generation, outcome } => self.complete(generation, outcome),
        }
    }

    fn unchanged(self) -> Transition {
        Transition { session: self, fetch: None }
    }

    /// Issue a new ticket if there is a location to fetch for.
    fn request_fetch(self) -> Transition {
        if self.location.is_empty() {
            return self.unchanged();
        }

        let generation = self.last_generation + 1;
        let ticket = FetchTicket::new(generation, self.coordinates, self.selected_date);

        tracing::debug!(
            generation,
            location = %self.location,
            date = %self.selected_date,
            "fetch requested"
        );

        let session =
            Session { last_generation: generation, phase: Phase::Loading { generation }, ..self };

        Transition { session, fetch: Some(ticket) }
    }

    fn complete(self, generation: u64, outcome: Result<Conditions, FetchError>) -> Transition {
        let awaited = matches!(self.phase, Phase::Loading { generation: g } if g == generation);
        if !awaited {
            tracing::warn!(
                generation,
                latest = self.last_generation,
                "discarding stale fetch result"
            );
            return self.unchanged();
        }

        let phase = match outcome {
            Ok(conditions) => Phase::Ready { generation, conditions },
            Err(error) => Phase::Failed { generation, error },
        };

        Session { phase, ..self }.unchanged()
    }

    /// What the user should see at `now`.
    pub fn view(&self, now: DateTime<FixedOffset>) -> View {
        match &self.phase {
            Phase::Idle | Phase::Loading { .. } => View::Loading,
            Phase::Failed { error, .. } => View::Failed { message: error.to_string() },
            Phase::Ready { conditions, .. } => View::Ready(Box::new(Report::new(
                &self.location,
                self.selected_date,
                conditions,
                now,
            ))),
        }
    }
}

/// Rendered state of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum View {
    Loading,
    Failed { message: String },
    Ready(Box<Report>),
}

/// Everything shown once both records are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub location: String,
    pub date: NaiveDate,
    pub condition: LightingCondition,
    pub condition_name: &'static str,
    pub tip: &'static str,
    pub sunrise: String,
    pub sunset: String,
    pub solar_noon: String,
    pub day_length: String,
    pub temperature_celsius: f64,
    pub weather_condition: String,
}

impl Report {
    /// Classifies at `now`; sun times are shown in `now`'s offset.
    pub fn new(
        location: &str,
        date: NaiveDate,
        conditions: &Conditions,
        now: DateTime<FixedOffset>,
    ) -> Self {
        let condition = conditions.classify_at(now);
        let zone = now.offset();
        let sun = &conditions.sun;

        Self {
            location: location.to_string(),
            date,
            condition,
            condition_name: condition.name(),
            tip: tip_for(condition),
            sunrise: format_clock(&sun.sunrise.with_timezone(zone)),
            sunset: format_clock(&sun.sunset.with_timezone(zone)),
            solar_noon: format_clock(&sun.solar_noon.with_timezone(zone)),
            day_length: humanize_duration(u64::from(sun.day_length_seconds)),
            temperature_celsius: conditions.weather.temperature_celsius,
            weather_condition: conditions.weather.condition_text.clone(),
        }
    }
}
