use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{CustomType, DateSelect, InquireError, Select, Text};

use sundata_core::{
    Config, Event, LightingCondition, Providers, Session, Transition, View, WeatherRecord,
    classify, fetch_conditions, providers_from_config, session::LOADING_TEXT, tip_for,
    tip_for_name,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "sundata", version, about = "Lighting conditions and photography tips")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set coordinates and provider endpoints interactively.
    Configure,

    /// Fetch sun and weather data once and show the lighting conditions.
    Show {
        /// Location name. Requests always use the configured coordinates.
        #[arg(value_parser = clap::builder::NonEmptyStringValueParser::new())]
        location: String,

        /// Date as YYYY-MM-DD; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Evaluate at this RFC 3339 instant instead of now.
        #[arg(long)]
        at: Option<DateTime<FixedOffset>>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Prompt for location and date, refetching on every change.
    Interactive,

    /// Classify an instant offline from explicit sun times and weather.
    Classify {
        /// RFC 3339 sunrise, e.g. 2024-01-01T07:00:00-08:00
        #[arg(long)]
        sunrise: DateTime<FixedOffset>,

        /// RFC 3339 sunset
        #[arg(long)]
        sunset: DateTime<FixedOffset>,

        /// Weather tag: clear, cloudy, rain, fog, snow, mist, ...
        #[arg(long, default_value = "")]
        condition: String,

        /// Instant to classify; defaults to now.
        #[arg(long)]
        now: Option<DateTime<FixedOffset>>,
    },

    /// Print the photography tip for a lighting condition name.
    Tip {
        /// e.g. "Morning Golden Hour"
        label: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = self.config;

        match self.command {
            Command::Configure => configure(config_path.as_deref()),
            Command::Show { location, date, at, format } => {
                let config = load_config(config_path.as_deref())?;
                show(&config, location, date, at, format).await
            }
            Command::Interactive => {
                let config = load_config(config_path.as_deref())?;
                interactive(&config).await
            }
            Command::Classify { sunrise, sunset, condition, now } => {
                let now = now.unwrap_or_else(|| Local::now().fixed_offset());
                let weather = WeatherRecord::new(condition, 0.0);
                let label = classify(now, sunrise, sunset, &weather);

                println!("{label}");
                println!("{}", tip_for(label));
                Ok(())
            }
            Command::Tip { label } => {
                println!("{}", tip_for_input(&label));
                Ok(())
            }
        }
    }
}

/// Tip for a label typed by the user; case and surrounding spaces are ignored.
fn tip_for_input(label: &str) -> &'static str {
    let name = LightingCondition::try_from(label).map_or(label, |c| c.name());
    tip_for_name(name)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    tracing::debug!(
        latitude = config.location.latitude,
        longitude = config.location.longitude,
        "configuration loaded"
    );
    Ok(config)
}

fn configure(path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = load_config(path)?;

    config.location.latitude = CustomType::<f64>::new("Latitude:")
        .with_default(config.location.latitude)
        .with_error_message("Please type a number, e.g. 37.7749")
        .prompt()?;
    config.location.longitude = CustomType::<f64>::new("Longitude:")
        .with_default(config.location.longitude)
        .with_error_message("Please type a number, e.g. -122.4194")
        .prompt()?;
    config.sun.base_url = Text::new("Sunrise/sunset endpoint:")
        .with_default(&config.sun.base_url)
        .prompt()?;
    config.weather.base_url = Text::new("Weather endpoint:")
        .with_default(&config.weather.base_url)
        .prompt()?;

    let key = Text::new("Weather API key (empty for none):")
        .with_initial_value(config.weather.api_key.as_deref().unwrap_or_default())
        .prompt()?;
    config.weather.api_key = Some(key).filter(|k| !k.trim().is_empty());

    config.validate()?;

    let saved_to = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => config.save()?,
    };

    println!("Configuration saved to {}", saved_to.display());
    Ok(())
}

/// Run one fetch cycle, if the session asked for one, and apply its result.
async fn settle(providers: &Providers, transition: Transition) -> Session {
    let Transition { session, fetch } = transition;

    let Some(ticket) = fetch else {
        return session;
    };

    let outcome =
        fetch_conditions(providers.sun.as_ref(), providers.weather.as_ref(), &ticket).await;
    session
        .transition(Event::FetchCompleted { generation: ticket.generation, outcome })
        .session
}

async fn show(
    config: &Config,
    location: String,
    date: Option<NaiveDate>,
    at: Option<DateTime<FixedOffset>>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let providers = providers_from_config(config)?;

    let now = at.unwrap_or_else(|| Local::now().fixed_offset());
    let session = Session::new(config.location, date.unwrap_or_else(|| now.date_naive()));

    let session = settle(&providers, session.transition(Event::LocationChanged(location))).await;

    let view = session.view(now);
    render::print_view(&view, format)?;

    if let View::Failed { .. } = view {
        bail!("Could not load sun and weather data");
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum MenuChoice {
    Location,
    Date,
    Refresh,
    Quit,
}

impl std::fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MenuChoice::Location => "Change location",
            MenuChoice::Date => "Change date",
            MenuChoice::Refresh => "Show current conditions",
            MenuChoice::Quit => "Quit",
        })
    }
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let providers = providers_from_config(config)?;
    let mut session = Session::new(config.location, Local::now().date_naive());

    loop {
        let choices =
            vec![MenuChoice::Location, MenuChoice::Date, MenuChoice::Refresh, MenuChoice::Quit];

        let event = match prompt(Select::new("What next?", choices).prompt())? {
            None | Some(MenuChoice::Quit) => break,
            Some(MenuChoice::Refresh) => None,
            Some(MenuChoice::Location) => {
                let text = Text::new("Enter location:")
                    .with_initial_value(session.location())
                    .prompt();
                prompt(text)?.map(Event::LocationChanged)
            }
            Some(MenuChoice::Date) => {
                let date = DateSelect::new("Date:")
                    .with_default(session.selected_date())
                    .prompt();
                prompt(date)?.map(Event::DateChanged)
            }
        };

        if let Some(event) = event {
            let transition = session.transition(event);
            if transition.fetch.is_some() {
                println!("{LOADING_TEXT}");
            }
            session = settle(&providers, transition).await;
        }

        render::print_view(&session.view(Local::now().fixed_offset()), OutputFormat::Text)?;
        println!();
    }

    Ok(())
}

/// `None` when the user cancels a prompt with Esc or Ctrl-C.
fn prompt<T>(result: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Prompt failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_options() {
        let cli = Cli::try_parse_from([
            "sundata",
            "show",
            "Oakland",
            "--date",
            "2024-06-21",
            "--at",
            "2024-06-21T05:30:00-07:00",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Command::Show { location, date, at, format } => {
                assert_eq!(location, "Oakland");
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 21));
                assert_eq!(at.unwrap().to_rfc3339(), "2024-06-21T05:30:00-07:00");
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_classify() {
        let cli = Cli::try_parse_from([
            "sundata",
            "classify",
            "--sunrise",
            "2024-01-01T07:00:00-08:00",
            "--sunset",
            "2024-01-01T17:00:00-08:00",
            "--condition",
            "mist",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Command::Classify { ref condition, now: None, .. } if condition == "mist"
        ));
    }

    #[test]
    fn global_config_flag() {
        let cli =
            Cli::try_parse_from(["sundata", "tip", "Night", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn rejects_bad_date() {
        let err = Cli::try_parse_from(["sundata", "show", "SF", "--date", "21/06/2024"]);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_empty_location() {
        let err = Cli::try_parse_from(["sundata", "show", ""]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn typed_tip_label_is_normalised() {
        assert_eq!(tip_for_input("  night "), tip_for(LightingCondition::Night));
        assert_eq!(tip_for_input("MISTY MORNING"), tip_for(LightingCondition::MistyMorning));
        assert_eq!(tip_for_input("eclipse"), sundata_core::DEFAULT_TIP);
    }

    #[test]
    fn cancelled_prompt_is_none() {
        let out: Option<u8> = prompt(Err(InquireError::OperationCanceled)).unwrap();
        assert!(out.is_none());
        assert_eq!(prompt(Ok(3u8)).unwrap(), Some(3));
    }
}
