use chrono::{DateTime, TimeZone};

/// `HH:MM:SS` in whatever zone `instant` carries.
pub fn format_clock<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    instant.format("%H:%M:%S").to_string()
}

/// Relative-time phrase for a duration, e.g. `"10 hours"` or `"a day"`.
///
/// Each unit is rounded on its own, then the first threshold that fits wins.
pub fn humanize_duration(seconds: u64) -> String {
    let secs = seconds as f64;
    let minutes = (secs / 60.0).round() as u64;
    let hours = (secs / 3_600.0).round() as u64;
    let days = (secs / 86_400.0).round() as u64;
    let months = (secs / (86_400.0 * 30.436_875)).round() as u64;
    let years = (secs / (86_400.0 * 365.2425)).round() as u64;

    if seconds < 45 {
        "a few seconds".to_string()
    } else if minutes <= 1 {
        "a minute".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes")
    } else if hours <= 1 {
        "an hour".to_string()
    } else if hours < 22 {
        format!("{hours} hours")
    } else if days <= 1 {
        "a day".to_string()
    } else if days < 26 {
        format!("{days} days")
    } else if months <= 1 {
        "a month".to_string()
    } else if months < 11 {
        format!("{months} months")
    } else if years <= 1 {
        "a year".to_string()
    } else {
        format!("{years} years")
    }
}
