//! Human-friendly and JSON output for a session view.

use sundata_core::{Report, View, session::LOADING_TEXT};

use crate::cli::OutputFormat;

pub fn print_view(view: &View, format: OutputFormat) -> anyhow::Result<()> {
    let out = match format {
        OutputFormat::Text => render_text(view),
        OutputFormat::Json => serde_json::to_string_pretty(view)?,
    };

    println!("{out}");
    Ok(())
}

pub fn render_text(view: &View) -> String {
    match view {
        View::Loading => LOADING_TEXT.to_string(),
        View::Failed { message } => format!("Could not load data: {message}"),
        View::Ready(report) => render_report(report),
    }
}

fn render_report(report: &Report) -> String {
    format!(
        "Location: {location} ({date})\n\
         Current Conditions: {condition}\n\
         Photography Tips: {tip}\n\
         \n\
         Sun Data:\n  \
         Sunrise: {sunrise}\n  \
         Sunset: {sunset}\n  \
         Solar Noon: {solar_noon}\n  \
         Day Length: {day_length}\n\
         \n\
         Weather:\n  \
         Temperature: {temperature}°C\n  \
         Condition: {weather}",
        location = report.location,
        date = report.date,
        condition = report.condition_name,
        tip = report.tip,
        sunrise = report.sunrise,
        sunset = report.sunset,
        solar_noon = report.solar_noon,
        day_length = report.day_length,
        temperature = report.temperature_celsius,
        weather = report.weather_condition,
    )
}
