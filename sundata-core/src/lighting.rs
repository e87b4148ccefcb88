//! Lighting-condition classifier.
//!
//! Maps the current instant, the day's sunrise/sunset and the weather tag to
//! exactly one [`LightingCondition`]. The time windows are tested in a fixed
//! order and the first match wins; the order is part of the contract.
//!
//! With golden hour and blue hour sharing the same radius, the golden-hour
//! windows fully cover the blue-hour, dawn and dusk windows, so those labels
//! are never produced. They are still tested, in their place in the chain.

use chrono::{DateTime, Duration, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::model::{Conditions, WeatherCondition, WeatherRecord};

/// Radius of every window around sunrise and sunset.
pub const WINDOW_RADIUS_MINUTES: i64 = 30;

/// Before this local hour, mist reads as a misty morning.
const MISTY_MORNING_END_HOUR: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightingCondition {
    MorningGoldenHour,
    EveningGoldenHour,
    MorningBlueHour,
    EveningBlueHour,
    Night,
    Dawn,
    Dusk,
    Sunny,
    Overcast,
    Rainy,
    Foggy,
    Snowy,
    MistyMorning,
    Misty,
    NormalDaylight,
}

impl LightingCondition {
    pub const fn all() -> &'static [LightingCondition] {
        &[
            LightingCondition::MorningGoldenHour,
            LightingCondition::EveningGoldenHour,
            LightingCondition::MorningBlueHour,
            LightingCondition::EveningBlueHour,
            LightingCondition::Night,
            LightingCondition::Dawn,
            LightingCondition::Dusk,
            LightingCondition::Sunny,
            LightingCondition::Overcast,
            LightingCondition::Rainy,
            LightingCondition::Foggy,
            LightingCondition::Snowy,
            LightingCondition::MistyMorning,
            LightingCondition::Misty,
            LightingCondition::NormalDaylight,
        ]
    }

    /// Human-readable name, used as the heading and as the tip-table key.
    pub fn name(&self) -> &'static str {
        match self {
            LightingCondition::MorningGoldenHour => "Morning Golden Hour",
            LightingCondition::EveningGoldenHour => "Evening Golden Hour",
            LightingCondition::MorningBlueHour => "Morning Blue Hour",
            LightingCondition::EveningBlueHour => "Evening Blue Hour",
            LightingCondition::Night => "Night",
            LightingCondition::Dawn => "Dawn",
            LightingCondition::Dusk => "Dusk",
            LightingCondition::Sunny => "Sunny",
            LightingCondition::Overcast => "Overcast",
            LightingCondition::Rainy => "Rainy",
            LightingCondition::Foggy => "Foggy",
            LightingCondition::Snowy => "Snowy",
            LightingCondition::MistyMorning => "Misty Morning",
            LightingCondition::Misty => "Misty",
            LightingCondition::NormalDaylight => "Normal daylight conditions",
        }
    }
}

impl std::fmt::Display for LightingCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for LightingCondition {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let wanted = value.trim();

        LightingCondition::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow::anyhow!("Unknown lighting condition '{value}'."))
    }
}

impl FromStr for LightingCondition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LightingCondition::try_from(s)
    }
}

/// Classify `now` against the day's sun times, falling back to the weather.
pub fn classify(
    now: DateTime<FixedOffset>,
    sunrise: DateTime<FixedOffset>,
    sunset: DateTime<FixedOffset>,
    weather: &WeatherRecord,
) -> LightingCondition {
    let radius = Duration::minutes(WINDOW_RADIUS_MINUTES);

    let dawn = sunrise - radius;
    let dusk = sunset + radius;

    if within(now, sunrise - radius, sunrise + radius) {
        LightingCondition::MorningGoldenHour
    } else if within(now, sunset - radius, sunset + radius) {
        LightingCondition::EveningGoldenHour
    } else if within(now, sunrise - radius, sunrise) {
        LightingCondition::MorningBlueHour
    } else if within(now, sunset, sunset + radius) {
        LightingCondition::EveningBlueHour
    } else if now < dawn {
        LightingCondition::Night
    } else if strictly_between(now, dawn, sunrise) {
        LightingCondition::Dawn
    } else if strictly_between(now, sunset, dusk) {
        LightingCondition::Dusk
    } else {
        by_weather(now, weather.condition)
    }
}

impl Conditions {
    pub fn classify_at(&self, now: DateTime<FixedOffset>) -> LightingCondition {
        classify(now, self.sun.sunrise, self.sun.sunset, &self.weather)
    }
}

fn by_weather(now: DateTime<FixedOffset>, condition: WeatherCondition) -> LightingCondition {
    match condition {
        WeatherCondition::Clear => LightingCondition::Sunny,
        WeatherCondition::Cloudy => LightingCondition::Overcast,
        WeatherCondition::Rain => LightingCondition::Rainy,
        WeatherCondition::Fog => LightingCondition::Foggy,
        WeatherCondition::Snow => LightingCondition::Snowy,
        WeatherCondition::Mist if now.hour() < MISTY_MORNING_END_HOUR => {
            LightingCondition::MistyMorning
        }
        WeatherCondition::Mist => LightingCondition::Misty,
        WeatherCondition::Other => LightingCondition::NormalDaylight,
    }
}

fn within(
    now: DateTime<FixedOffset>,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> bool {
    start <= now && now <= end
}

fn strictly_between(
    now: DateTime<FixedOffset>,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> bool {
    start < now && now < end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hms: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(&format!("2024-01-01T{hms}-08:00")).unwrap()
    }

    fn run(now: &str, condition: &str) -> LightingCondition {
        classify(at(now), at("07:00:00"), at("17:00:00"), &WeatherRecord::new(condition, 12.0))
    }

    #[test]
    fn before_dawn_is_night() {
        assert_eq!(run("03:00:00", "clear"), LightingCondition::Night);
        assert_eq!(run("06:29:59", "rain"), LightingCondition::Night);
    }

    #[test]
    fn golden_hour_covers_both_sides_of_sunrise() {
        for t in ["06:30:00", "06:45:00", "07:00:00", "07:15:00", "07:30:00"] {
            assert_eq!(run(t, "clear"), LightingCondition::MorningGoldenHour, "at {t}");
        }
    }

    #[test]
    fn golden_hour_covers_both_sides_of_sunset() {
        for t in ["16:30:00", "16:59:59", "17:00:00", "17:20:00", "17:30:00"] {
            assert_eq!(run(t, "snow"), LightingCondition::EveningGoldenHour, "at {t}");
        }
    }

    #[test]
    fn blue_hour_dawn_and_dusk_are_shadowed_by_golden_hour() {
        let sunrise = at("07:00:00");
        let sunset = at("17:00:00");
        let weather = WeatherRecord::new("clear", 20.0);

        // Every second of the day.
        let start = at("00:00:00");
        for s in 0..(24 * 60 * 60) {
            let now = start + Duration::seconds(s);
            let label = classify(now, sunrise, sunset, &weather);
            assert!(
                !matches!(
                    label,
                    LightingCondition::MorningBlueHour
                        | LightingCondition::EveningBlueHour
                        | LightingCondition::Dawn
                        | LightingCondition::Dusk
                ),
                "got {label} at {now}"
            );
        }
    }

    #[test]
    fn daytime_falls_back_to_weather() {
        assert_eq!(run("12:00:00", "clear"), LightingCondition::Sunny);
        assert_eq!(run("12:00:00", "cloudy"), LightingCondition::Overcast);
        assert_eq!(run("12:00:00", "rain"), LightingCondition::Rainy);
        assert_eq!(run("12:00:00", "fog"), LightingCondition::Foggy);
        assert_eq!(run("12:00:00", "snow"), LightingCondition::Snowy);
        assert_eq!(run("12:00:00", "sandstorm"), LightingCondition::NormalDaylight);
    }

    #[test]
    fn mist_depends_on_hour() {
        assert_eq!(run("08:00:00", "mist"), LightingCondition::MistyMorning);
        assert_eq!(run("09:59:59", "mist"), LightingCondition::MistyMorning);
        assert_eq!(run("10:00:00", "mist"), LightingCondition::Misty);
        assert_eq!(run("12:00:00", "mist"), LightingCondition::Misty);
    }

    #[test]
    fn after_dusk_falls_through_to_weather() {
        assert_eq!(run("17:30:01", "clear"), LightingCondition::Sunny);
        assert_eq!(run("23:00:00", "mist"), LightingCondition::Misty);
    }

    #[test]
    fn missing_condition_is_normal_daylight() {
        assert_eq!(run("13:00:00", ""), LightingCondition::NormalDaylight);
    }

    #[test]
    fn comparisons_ignore_offsets() {
        // 15:00Z is 07:00 in San Francisco (PST).
        let sunrise = DateTime::parse_from_rfc3339("2024-01-01T15:00:00+00:00").unwrap();
        let sunset = DateTime::parse_from_rfc3339("2024-01-02T01:00:00+00:00").unwrap();
        let label = classify(at("07:10:00"), sunrise, sunset, &WeatherRecord::new("clear", 9.0));
        assert_eq!(label, LightingCondition::MorningGoldenHour);
    }

    #[test]
    fn classify_is_idempotent() {
        let weather = WeatherRecord::new("mist", 4.0);
        let first = classify(at("08:00:00"), at("07:00:00"), at("17:00:00"), &weather);
        let second = classify(at("08:00:00"), at("07:00:00"), at("17:00:00"), &weather);
        assert_eq!(first, second);
    }

    #[test]
    fn names_roundtrip() {
        for label in LightingCondition::all() {
            let parsed = LightingCondition::try_from(label.name()).expect("roundtrip should succeed");
            assert_eq!(*label, parsed);
        }
    }

    #[test]
    fn unknown_name_errors() {
        let err = LightingCondition::try_from("Eclipse").unwrap_err();
        assert!(err.to_string().contains("Unknown lighting condition"));
    }
}
