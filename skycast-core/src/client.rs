use reqwest::{Client, Request, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    model::{CurrentWeather, Query},
};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_LANG: &str = "en";

/// Client for the provider's current-weather endpoint.
///
/// Holds no per-call state; concurrent lookups are independent. A failed
/// call surfaces immediately — no retries at any layer.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    api_key: String,
    base_url: String,
    lang: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
        }
    }

    /// Response language for the provider's free-text condition field.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn fetch(&self, query: &Query) -> Result<CurrentWeather, WeatherError> {
        match query {
            Query::City(name) => self.fetch_by_city(name).await,
            Query::Coordinates { lat, lon } => self.fetch_by_coordinates(*lat, *lon).await,
        }
    }

    /// Current weather for a city name.
    ///
    /// An empty (after trimming) name fails with `InvalidInput` before any
    /// request is built. Non-success statuses map per `map_city_status`.
    pub async fn fetch_by_city(&self, name: &str) -> Result<CurrentWeather, WeatherError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WeatherError::InvalidInput);
        }

        let request = self.city_request(name)?;
        debug!(city = name, "requesting current weather");

        let (status, body) = self.execute(request).await?;
        if !status.is_success() {
            return Err(map_city_status(status, &body));
        }

        parse_current(&body).and_then(transform)
    }

    /// Current weather for a coordinate pair.
    ///
    /// Coordinates are passed through unvalidated; the provider enforces
    /// its own ranges. Any rejected status collapses to `GeoLookupFailed`,
    /// coarser than the city-name path.
    pub async fn fetch_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<CurrentWeather, WeatherError> {
        let request = self.coordinates_request(lat, lon)?;
        debug!(lat, lon, "requesting current weather by coordinates");

        let (status, body) = self.execute(request).await?;
        if !status.is_success() {
            warn!(%status, "coordinate lookup rejected by provider");
            return Err(map_coordinates_status(status));
        }

        parse_current(&body).and_then(transform)
    }

    fn city_request(&self, name: &str) -> Result<Request, WeatherError> {
        self.http
            .get(format!("{}/weather", self.base_url))
            .query(&[
                ("q", name),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .build()
            .map_err(|err| {
                warn!(%err, "failed to build city request");
                WeatherError::ConnectionFailed
            })
    }

    fn coordinates_request(&self, lat: f64, lon: f64) -> Result<Request, WeatherError> {
        let params = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
            ("lang", self.lang.clone()),
        ];

        self.http
            .get(format!("{}/weather", self.base_url))
            .query(&params)
            .build()
            .map_err(|err| {
                warn!(%err, "failed to build coordinates request");
                WeatherError::ConnectionFailed
            })
    }

    /// Send a request and read the full body. Any transport failure, on
    /// send or while reading, means no usable response was obtained.
    async fn execute(&self, request: Request) -> Result<(StatusCode, String), WeatherError> {
        let response = self.http.execute(request).await.map_err(|err| {
            warn!(%err, "request to weather provider failed");
            WeatherError::ConnectionFailed
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            warn!(%err, "failed to read provider response body");
            WeatherError::ConnectionFailed
        })?;

        debug!(%status, "provider responded");
        Ok((status, body))
    }
}

/// Status mapping for the city-name path. Fixed for the three statuses the
/// provider documents; anything else carries the body's message if one can
/// be read.
fn map_city_status(status: StatusCode, body: &str) -> WeatherError {
    match status {
        StatusCode::NOT_FOUND => WeatherError::CityNotFound,
        StatusCode::UNAUTHORIZED => WeatherError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimited,
        _ => WeatherError::Provider(provider_message(body)),
    }
}

/// Status mapping for the coordinate path: every rejected status collapses
/// to the same kind, regardless of what the provider answered. Coarser than
/// the city-name mapping on purpose; see DESIGN.md.
fn map_coordinates_status(_status: StatusCode) -> WeatherError {
    WeatherError::GeoLookupFailed
}

fn provider_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| "failed to fetch weather data".to_string())
}

fn parse_current(body: &str) -> Result<OwCurrentResponse, WeatherError> {
    serde_json::from_str(body).map_err(|err| {
        warn!(%err, "could not deserialize provider payload");
        WeatherError::MalformedResponse
    })
}

/// Reshape the provider payload into the flat record. Pure; the only
/// remaining structural check is the condition list, which the provider
/// may return empty.
fn transform(raw: OwCurrentResponse) -> Result<CurrentWeather, WeatherError> {
    let condition = raw
        .weather
        .into_iter()
        .next()
        .ok_or(WeatherError::MalformedResponse)?;

    Ok(CurrentWeather {
        city: raw.name,
        country: raw.sys.country,
        temperature_c: round_half_up(raw.main.temp),
        feels_like_c: round_half_up(raw.main.feels_like),
        description: condition.description,
        humidity_pct: raw.main.humidity,
        wind_speed_mps: raw.wind.speed,
        pressure_hpa: raw.main.pressure,
        visibility_km: raw.visibility / 1000,
        icon: condition.icon,
    })
}

/// Round to the nearest degree with .5 going toward positive infinity, so
/// -21.5 becomes -21 rather than -22.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: u32,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}
