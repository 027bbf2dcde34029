//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - The weatherapi.com transport behind the [`WeatherTransport`] trait
//! - The debounced search-to-forecast [`ResolutionFlow`]
//! - Shared domain models (candidates, forecast requests and results)

pub mod config;
pub mod debounce;
pub mod error;
pub mod flow;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::TransportError;
pub use flow::{DisplayState, FlowSettings, ResolutionFlow, SearchOutcome};
pub use model::{ForecastRequest, ForecastResult, LocationCandidate};
pub use provider::{WeatherTransport, client_from_config, weatherapi::WeatherApiClient};
