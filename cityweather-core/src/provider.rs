use crate::{
    Config, ForecastRequest, ForecastResult, LocationCandidate,
    provider::weatherapi::WeatherApiClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// The two calls the resolution flow needs from a weather backend.
///
/// Implementations absorb every failure and answer `None`; callers treat that
/// as "no data this round", never as an error to handle.
#[async_trait]
pub trait WeatherTransport: Send + Sync + Debug {
    async fn search(&self, city_name: &str) -> Option<Vec<LocationCandidate>>;

    async fn forecast(&self, request: &ForecastRequest) -> Option<ForecastResult>;
}

/// Construct the weatherapi.com client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<WeatherApiClient> {
    let api_key = config.require_api_key()?;
    Ok(WeatherApiClient::with_base_url(api_key, config.base_url.as_str()))
}
