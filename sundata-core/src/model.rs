use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Geographic position sent to both providers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// San Francisco; used for every request regardless of the location text.
    pub const DEFAULT: Coordinates = Coordinates { latitude: 37.7749, longitude: -122.4194 };
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsRequest {
    pub coordinates: Coordinates,
    pub date: NaiveDate,
}

impl ConditionsRequest {
    /// `YYYY-MM-DD`, as both providers expect it.
    pub fn date_param(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunRecord {
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
    pub solar_noon: DateTime<FixedOffset>,
    pub day_length_seconds: u32,
}

/// Coarse weather tag reported by the weather provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rain,
    Fog,
    Snow,
    Mist,
    Other,
}

impl WeatherCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "clear",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rain => "rain",
            WeatherCondition::Fog => "fog",
            WeatherCondition::Snow => "snow",
            WeatherCondition::Mist => "mist",
            WeatherCondition::Other => "other",
        }
    }

    /// Never fails: unknown or empty tags become [`WeatherCondition::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "clear" => WeatherCondition::Clear,
            "cloudy" => WeatherCondition::Cloudy,
            "rain" => WeatherCondition::Rain,
            "fog" => WeatherCondition::Fog,
            "snow" => WeatherCondition::Snow,
            "mist" => WeatherCondition::Mist,
            _ => WeatherCondition::Other,
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub condition: WeatherCondition,
    /// Tag exactly as the provider sent it, shown to the user.
    pub condition_text: String,
    pub temperature_celsius: f64,
}

impl WeatherRecord {
    pub fn new(condition_text: impl Into<String>, temperature_celsius: f64) -> Self {
        let condition_text = condition_text.into();
        Self {
            condition: WeatherCondition::from_tag(&condition_text),
            condition_text,
            temperature_celsius,
        }
    }
}

/// Sun and weather data fetched together for one location/date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub sun: SunRecord,
    pub weather: WeatherRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_tags_are_case_insensitive() {
        assert_eq!(WeatherCondition::from_tag("Mist"), WeatherCondition::Mist);
        assert_eq!(WeatherCondition::from_tag(" CLEAR "), WeatherCondition::Clear);
    }

    #[test]
    fn unknown_or_empty_tag_is_other() {
        assert_eq!(WeatherCondition::from_tag("hail"), WeatherCondition::Other);
        assert_eq!(WeatherCondition::from_tag(""), WeatherCondition::Other);
    }

    #[test]
    fn weather_record_keeps_raw_text() {
        let record = WeatherRecord::new("Rain", 11.5);
        assert_eq!(record.condition, WeatherCondition::Rain);
        assert_eq!(record.condition_text, "Rain");
    }

    #[test]
    fn date_param_is_iso() {
        let req = ConditionsRequest {
            coordinates: Coordinates::DEFAULT,
            date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        };
        assert_eq!(req.date_param(), "2024-03-07");
    }
}
