//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - The weather provider client (request building, error mapping,
//!   response normalization)
//! - The failure taxonomy callers branch on
//! - Configuration & credentials handling
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use client::WeatherClient;
pub use config::Config;
pub use error::WeatherError;
pub use model::{CurrentWeather, Query};
