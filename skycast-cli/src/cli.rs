use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use skycast_core::{Config, Query, WeatherClient};

use crate::report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the provider API key and response language.
    Configure {
        /// Response language code, e.g. "en" or "pt_br".
        #[arg(long)]
        lang: Option<String>,
    },

    /// Show current weather for a city or a coordinate pair.
    Show {
        /// City name; omit to repeat the last successful lookup.
        city: Option<String>,

        /// Latitude in degrees, used together with --lon.
        #[arg(long, requires = "lon", conflicts_with = "city", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in degrees, used together with --lat.
        #[arg(long, requires = "lat", conflicts_with = "city", allow_negative_numbers = true)]
        lon: Option<f64>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { lang } => configure(lang),
            Command::Show { city, lat, lon } => show(city, lat.zip(lon)).await,
        }
    }
}

fn configure(lang: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("Provider API key:")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    if let Some(lang) = lang {
        config.lang = lang;
    }
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

async fn show(city: Option<String>, coords: Option<(f64, f64)>) -> Result<()> {
    let mut config = Config::load()?;
    let client = WeatherClient::new(config.api_key()?).with_lang(config.lang.clone());

    let query = resolve_query(city, coords, config.last_city.clone())?;
    if let Query::City(name) = &query {
        info!(city = name.as_str(), "looking up current weather");
    }

    let weather = client.fetch(&query).await?;
    println!("{}", report::render(&weather));

    config.remember_city(weather.city);
    config.save()?;

    Ok(())
}

/// Pick the query for a `show` invocation: explicit coordinates win, then
/// an explicit city, then the last successfully looked-up city.
fn resolve_query(
    city: Option<String>,
    coords: Option<(f64, f64)>,
    last_city: Option<String>,
) -> Result<Query> {
    if let Some((lat, lon)) = coords {
        return Ok(Query::Coordinates { lat, lon });
    }

    match city.or(last_city) {
        Some(name) => Ok(Query::City(name)),
        None => bail!(
            "No city given and no previous lookup to repeat.\n\
             Hint: `skycast show <city>` or `skycast show --lat <deg> --lon <deg>`."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_take_precedence() {
        let query = resolve_query(None, Some((38.72, -9.14)), Some("Lisbon".into()))
            .expect("query must resolve");
        assert_eq!(
            query,
            Query::Coordinates {
                lat: 38.72,
                lon: -9.14
            }
        );
    }

    #[test]
    fn explicit_city_beats_remembered_one() {
        let query = resolve_query(Some("Porto".into()), None, Some("Lisbon".into()))
            .expect("query must resolve");
        assert_eq!(query, Query::City("Porto".into()));
    }

    #[test]
    fn bare_show_repeats_last_city() {
        let query =
            resolve_query(None, None, Some("Lisbon".into())).expect("query must resolve");
        assert_eq!(query, Query::City("Lisbon".into()));
    }

    #[test]
    fn bare_show_with_no_history_is_an_error() {
        let err = resolve_query(None, None, None).unwrap_err();
        assert!(err.to_string().contains("no previous lookup"));
    }

    #[test]
    fn show_args_parse() {
        let cli = Cli::try_parse_from(["skycast", "show", "Lisbon"]).expect("args must parse");
        match cli.command {
            Command::Show { city, lat, lon } => {
                assert_eq!(city.as_deref(), Some("Lisbon"));
                assert!(lat.is_none() && lon.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["skycast", "show", "--lat", "38.72"]).is_err());
        assert!(
            Cli::try_parse_from(["skycast", "show", "--lat", "38.72", "--lon", "-9.14"]).is_ok()
        );
    }

    #[test]
    fn coordinates_conflict_with_city() {
        assert!(
            Cli::try_parse_from([
                "skycast", "show", "Lisbon", "--lat", "38.72", "--lon", "-9.14"
            ])
            .is_err()
        );
    }
}
