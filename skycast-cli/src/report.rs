//! Human-friendly rendering of a weather lookup.

use skycast_core::CurrentWeather;

/// Image URL for a provider icon code, e.g. "01d".
pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon}@2x.png")
}

pub fn render(weather: &CurrentWeather) -> String {
    format!(
        "{}, {}\n\
         {}\n\
         \n\
         Temperature  {}\u{b0}C (feels like {}\u{b0}C)\n\
         Humidity     {}%\n\
         Wind         {:.1} m/s\n\
         Pressure     {} hPa\n\
         Visibility   {} km\n\
         Icon         {}",
        weather.city,
        weather.country,
        weather.description,
        weather.temperature_c,
        weather.feels_like_c,
        weather.humidity_pct,
        weather.wind_speed_mps,
        weather.pressure_hpa,
        weather.visibility_km,
        icon_url(&weather.icon),
    )
}
