use serde::{Deserialize, Serialize};

/// A single lookup request: a free-text city name or a coordinate pair.
/// Exactly one form per request.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

/// Flat record produced from the provider's raw response.
///
/// Either fully populated or not constructed at all; there is no partial
/// instance. Owned by the caller, fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Resolved place name from the provider.
    pub city: String,
    /// ISO country code.
    pub country: String,
    /// Current temperature, rounded to the nearest degree Celsius.
    pub temperature_c: i32,
    /// Perceived temperature, rounded to the nearest degree Celsius.
    pub feels_like_c: i32,
    /// Free-text condition in the provider's response locale.
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    /// Visibility in whole kilometers, floor-divided from meters.
    pub visibility_km: u32,
    /// Provider icon code, e.g. "01d"; the UI builds an image URL from it.
    pub icon: String,
}
