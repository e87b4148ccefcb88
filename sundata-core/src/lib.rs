//! Core library for the `sundata` CLI.
//!
//! This crate defines:
//! - The lighting-condition classifier and photography tips
//! - Sun and weather data providers behind async traits
//! - A session state machine that tags fetches and drops stale results
//! - Configuration handling and display formatting
//!
//! It is used by `sundata-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod fetch;
pub mod format;
pub mod lighting;
pub mod model;
pub mod provider;
pub mod session;
pub mod tips;

pub use config::{Config, SunConfig, WeatherConfig};
pub use fetch::{FetchError, FetchTicket, fetch_conditions};
pub use lighting::{LightingCondition, classify};
pub use model::{
    Conditions, ConditionsRequest, Coordinates, SunRecord, WeatherCondition, WeatherRecord,
};
pub use provider::{Providers, SunDataProvider, WeatherProvider, providers_from_config};
pub use session::{Event, Phase, Report, Session, Transition, View};
pub use tips::{DEFAULT_TIP, tip_for, tip_for_name};
