//! OpenWeatherMap current conditions.
//!
//! The only upstream call that needs no OAuth session: the API key travels as
//! the `appid` query parameter.

use reqwest::Client;

use crate::{
    error::{Error, Result},
    types::{WeatherResponse, WeatherView},
};

pub const SERVICE_NAME: &str = "OpenWeatherMap";

/// Fetches current conditions for a coordinate pair in imperial units.
///
/// # Errors
///
/// Returns [`Error::Upstream`] on a non-2xx answer (for example an invalid
/// API key) and [`Error::Http`] on transport or decoding failures.
pub async fn current_weather(
    client: &Client,
    api_url: &str,
    api_key: &str,
    lat: &str,
    lon: &str,
) -> Result<WeatherView> {
    let response = client
        .get(format!("{api_url}/weather"))
        .query(&[
            ("lat", lat),
            ("lon", lon),
            ("appid", api_key),
            ("units", "imperial"),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Upstream {
            service: SERVICE_NAME,
            status,
            body,
        });
    }

    let body = response.json::<WeatherResponse>().await?;
    Ok(weather_view(body))
}

/// Rounds the temperature (halves up) and keeps the first reported condition.
pub fn weather_view(raw: WeatherResponse) -> WeatherView {
    WeatherView {
        temp: (raw.main.temp + 0.5).floor() as i64,
        condition: raw
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .unwrap_or_default(),
        location: raw.name,
    }
}
