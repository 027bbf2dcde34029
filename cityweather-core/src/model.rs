use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of days requested per forecast call.
pub const FORECAST_HORIZON_DAYS: u8 = 7;

/// A location returned by the search endpoint, eligible for selection.
///
/// Every field is optional on the wire; a sparse entry still shows up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationCandidate {
    pub name: String,
    pub country: String,
    pub region: Option<String>,
    /// Provider-side identifier, passed through untouched.
    pub id: serde_json::Value,
}

impl LocationCandidate {
    /// `"name, country"` followed by the region when the provider sent one.
    pub fn label(&self) -> String {
        match self.region.as_deref().filter(|region| !region.is_empty()) {
            Some(region) => format!("{self} ({region})"),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for LocationCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub city_name: String,
    pub days: u8,
}

impl ForecastRequest {
    pub fn new(city_name: impl Into<String>, days: u8) -> Self {
        Self { city_name: city_name.into(), days }
    }
}

/// Forecast body as sent by the provider.
///
/// Only the top-level shape is checked: any block or leaf may be missing and
/// falls back to empty or `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastResult {
    pub location: ForecastLocation,
    pub current: CurrentConditions,
    pub forecast: Forecast,
}

impl ForecastResult {
    /// Sunrise of the first forecast day, if the provider sent one.
    pub fn sunrise_today(&self) -> Option<&str> {
        self.forecast.forecastday.first().and_then(|day| day.astro.sunrise.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastLocation {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    pub temp_c: Option<f64>,
    pub humidity: Option<u8>,
    pub wind_kph: Option<f64>,
    pub condition: Condition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub text: String,
    pub icon: String,
}

impl Condition {
    /// The provider sends protocol-relative icon paths (`//cdn.weatherapi.com/...`).
    pub fn icon_url(&self) -> Option<String> {
        if self.icon.is_empty() {
            None
        } else if self.icon.starts_with("//") {
            Some(format!("https:{}", self.icon))
        } else {
            Some(self.icon.clone())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastDay {
    pub date: Option<NaiveDate>,
    pub day: DaySummary,
    pub astro: Astro,
}

impl ForecastDay {
    /// Long English weekday name, e.g. "Monday".
    pub fn weekday(&self) -> Option<String> {
        self.date.map(|date| date.format("%A").to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaySummary {
    pub avgtemp_c: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Astro {
    pub sunrise: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST_JSON: &str = r#"{
        "location": { "name": "Islamabad", "country": "Pakistan", "region": "Islamabad", "lat": 33.7 },
        "current": {
            "temp_c": 21.0,
            "humidity": 40,
            "wind_kph": 9.4,
            "condition": { "text": "Sunny", "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png", "code": 1000 }
        },
        "forecast": {
            "forecastday": [
                { "date": "2024-03-04", "day": { "avgtemp_c": 18.2, "maxtemp_c": 24.0 }, "astro": { "sunrise": "06:21 AM" } },
                { "date": "2024-03-05", "day": { "avgtemp_c": 17.5 }, "astro": { "sunrise": "06:20 AM" } }
            ]
        }
    }"#;

    #[test]
    fn forecast_parses_and_ignores_unknown_fields() {
        let parsed: ForecastResult = serde_json::from_str(FORECAST_JSON).expect("valid forecast");

        assert_eq!(parsed.location.name, "Islamabad");
        assert_eq!(parsed.current.temp_c, Some(21.0));
        assert_eq!(parsed.current.humidity, Some(40));
        assert_eq!(parsed.forecast.forecastday.len(), 2);
        assert_eq!(parsed.sunrise_today(), Some("06:21 AM"));
    }

    #[test]
    fn forecast_without_forecast_block_has_no_days() {
        let json = r#"{
            "location": { "name": "Oslo", "country": "Norway" },
            "current": { "temp_c": -3.5, "humidity": 80, "wind_kph": 12.0, "condition": { "text": "Snow" } }
        }"#;
        let parsed: ForecastResult = serde_json::from_str(json).expect("valid forecast");

        assert!(parsed.forecast.forecastday.is_empty());
        assert_eq!(parsed.sunrise_today(), None);
        assert_eq!(parsed.current.condition.icon_url(), None);
    }

    #[test]
    fn icon_url_adds_scheme_to_protocol_relative_paths() {
        let condition = Condition {
            text: "Sunny".into(),
            icon: "//cdn.weatherapi.com/weather/64x64/day/113.png".into(),
        };
        assert_eq!(
            condition.icon_url().as_deref(),
            Some("https://cdn.weatherapi.com/weather/64x64/day/113.png")
        );

        let absolute = Condition { text: "Sunny".into(), icon: "http://example.com/a.png".into() };
        assert_eq!(absolute.icon_url().as_deref(), Some("http://example.com/a.png"));
    }

    #[test]
    fn weekday_is_long_english_name() {
        let parsed: ForecastResult = serde_json::from_str(FORECAST_JSON).expect("valid forecast");
        let days: Vec<Option<String>> =
            parsed.forecast.forecastday.iter().map(ForecastDay::weekday).collect();

        assert_eq!(days, vec![Some("Monday".to_string()), Some("Tuesday".to_string())]);
    }

    #[test]
    fn candidate_display_and_opaque_id() {
        let json = r#"[{ "id": 2801268, "name": "London", "region": "City of London, Greater London", "country": "United Kingdom", "lat": 51.52 }]"#;
        let parsed: Vec<LocationCandidate> = serde_json::from_str(json).expect("valid search");

        assert_eq!(parsed[0].to_string(), "London, United Kingdom");
        assert_eq!(parsed[0].id, serde_json::json!(2801268));
        assert_eq!(parsed[0].label(), "London, United Kingdom (City of London, Greater London)");
    }

    #[test]
    fn sparse_search_entry_keeps_whole_list() {
        let json = r#"[{"id":1,"name":"London","country":"United Kingdom"},{"id":2,"name":"Atlantis"}]"#;
        let parsed: Vec<LocationCandidate> = serde_json::from_str(json).expect("lenient search");

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].name, "Atlantis");
        assert_eq!(parsed[1].country, "");
        assert_eq!(parsed[1].label(), "Atlantis, ");
    }

    #[test]
    fn sparse_forecast_body_still_parses() {
        let json = r#"{
            "location": { "name": "Oslo" },
            "current": { "temp_c": 4.0, "condition": {} },
            "forecast": { "forecastday": [ { "date": "2024-03-04", "day": {} }, {} ] }
        }"#;
        let parsed: ForecastResult = serde_json::from_str(json).expect("lenient forecast");

        assert_eq!(parsed.current.temp_c, Some(4.0));
        assert_eq!(parsed.current.humidity, None);
        assert_eq!(parsed.current.wind_kph, None);
        assert_eq!(parsed.current.condition.text, "");
        assert_eq!(parsed.forecast.forecastday[0].day.avgtemp_c, None);
        assert_eq!(parsed.forecast.forecastday[1].weekday(), None);
        assert_eq!(parsed.sunrise_today(), None);
    }

    #[test]
    fn wrong_top_level_shape_is_rejected() {
        assert!(serde_json::from_str::<Vec<LocationCandidate>>(r#"{"error":"nope"}"#).is_err());
        assert!(serde_json::from_str::<ForecastResult>("[]").is_err());
    }
}
