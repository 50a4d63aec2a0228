use thiserror::Error;

/// Failure kinds the weather client can report.
///
/// Every variant is terminal for the call that produced it; nothing is
/// retried internally. The display messages are the user-facing text the
/// CLI prints, so callers can branch on the variant and show the message
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The city name was empty after trimming; no request was sent.
    #[error("City name must not be empty.")]
    InvalidInput,

    /// The provider answered 404 for a city-name lookup.
    #[error("City not found. Check the name and try again.")]
    CityNotFound,

    /// The provider rejected the API key (401).
    #[error("The weather provider rejected the API key.")]
    Unauthorized,

    /// The provider answered 429.
    #[error("Request limit exceeded. Try again later.")]
    RateLimited,

    /// Any other non-success status on the city-name path, with the
    /// provider-supplied message when one could be read from the body.
    #[error("Weather provider error: {0}")]
    Provider(String),

    /// Any non-success status on the coordinate path. Deliberately coarser
    /// than the city-name mapping; see DESIGN.md.
    #[error("Could not fetch weather for the given location.")]
    GeoLookupFailed,

    /// The provider answered 2xx but the body was missing required fields.
    #[error("The weather provider returned an unexpected response.")]
    MalformedResponse,

    /// No response was obtained at all (send or body read failed).
    #[error("Connection failed. Check your network and try again.")]
    ConnectionFailed,
}
