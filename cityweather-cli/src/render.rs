use std::fmt::Display;

use cityweather_core::{ForecastResult, LocationCandidate};

pub fn forecast(forecast: &ForecastResult) -> String {
    let current = &forecast.current;
    let mut lines = vec![
        format!("{}, {}", forecast.location.name, forecast.location.country),
        format!("{}° {}", or_dash(current.temp_c), current.condition.text),
    ];

    if let Some(icon) = current.condition.icon_url() {
        lines.push(format!("icon {icon}"));
    }

    lines.push(format!(
        "wind {} km  humidity {}%  sunrise {}",
        or_dash(current.wind_kph),
        or_dash(current.humidity),
        forecast.sunrise_today().unwrap_or("-"),
    ));

    let days = &forecast.forecast.forecastday;
    if !days.is_empty() {
        lines.push("Daily forecast".to_string());
        lines.extend(days.iter().map(|day| {
            format!("  {:<10} {}°", or_dash(day.weekday()), or_dash(day.day.avgtemp_c))
        }));
    }

    lines.iter().map(|line| format!("{line}\n")).collect()
}

pub fn candidates(candidates: &[LocationCandidate]) -> String {
    if candidates.is_empty() {
        return "No matching locations.\n".to_string();
    }

    candidates.iter().map(|candidate| format!("{}\n", candidate.label())).collect()
}

fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}
