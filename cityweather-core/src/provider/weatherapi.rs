use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::TransportError,
    model::{ForecastRequest, ForecastResult, LocationCandidate},
};

use super::WeatherTransport;

const SEARCH: &str = "search";
const FORECAST: &str = "forecast";

#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http: Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_request(&self, city_name: &str) -> RequestBuilder {
        self.http
            .get(format!("{}/search.json", self.base_url))
            .query(&[("key", self.api_key.as_str()), ("q", city_name)])
    }

    fn forecast_request(&self, request: &ForecastRequest) -> RequestBuilder {
        self.http.get(format!("{}/forecast.json", self.base_url)).query(&[
            ("key", self.api_key.as_str()),
            ("q", request.city_name.as_str()),
            ("days", &request.days.to_string()),
            ("aqi", "no"),
            ("alerts", "no"),
        ])
    }

    async fn fetch<T: DeserializeOwned>(
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, TransportError> {
        let res =
            request.send().await.map_err(|source| TransportError::Request { endpoint, source })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| TransportError::Request { endpoint, source })?;

        if !status.is_success() {
            return Err(TransportError::Status { endpoint, status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|source| TransportError::Decode { endpoint, source })
    }
}

/// Single error boundary: every failure is logged here and becomes `None`.
fn absorb<T>(result: Result<T, TransportError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(endpoint = err.endpoint(), error = %err, "weatherapi call failed");
            None
        }
    }
}

#[async_trait]
impl WeatherTransport for WeatherApiClient {
    async fn search(&self, city_name: &str) -> Option<Vec<LocationCandidate>> {
        debug!(query = city_name, "searching locations");
        absorb(Self::fetch(SEARCH, self.search_request(city_name)).await)
    }

    async fn forecast(&self, request: &ForecastRequest) -> Option<ForecastResult> {
        debug!(city = %request.city_name, days = request.days, "fetching forecast");
        absorb(Self::fetch(FORECAST, self.forecast_request(request)).await)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WeatherApiClient {
        WeatherApiClient::with_base_url("KEY".into(), "https://api.weatherapi.com/v1/")
    }

    #[test]
    fn search_url_embeds_key_and_query() {
        let request = client().search_request("Lon").build().expect("valid request");

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://api.weatherapi.com/v1/search.json?key=KEY&q=Lon"
        );
    }

    #[test]
    fn forecast_url_has_fixed_parameters() {
        let request = client()
            .forecast_request(&ForecastRequest::new("New York", 7))
            .build()
            .expect("valid request");

        assert_eq!(
            request.url().as_str(),
            "https://api.weatherapi.com/v1/forecast.json?key=KEY&q=New+York&days=7&aqi=no&alerts=no"
        );
    }

    #[test]
    fn truncate_body_limits_long_bodies() {
        let long = "é".repeat(300);
        let short = truncate_body(&long);

        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn unreachable_host_collapses_to_none() {
        let client = WeatherApiClient::with_base_url("KEY".into(), "http://127.0.0.1:1/v1");

        assert!(client.search("London").await.is_none());
        assert!(client.forecast(&ForecastRequest::new("London", 7)).await.is_none());
    }
}
