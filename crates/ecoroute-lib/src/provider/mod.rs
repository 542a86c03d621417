//! Traffic and weather data capabilities consumed by the route optimizer.
//!
//! This module provides:
//! - [`TrafficDataProvider`] / [`WeatherDataProvider`] - the capability traits
//! - [`TrafficResponse`] / [`WeatherResponse`] - typed provider answers
//! - Live HTTP variants ([`TomTomTrafficProvider`], [`AqicnWeatherProvider`])
//! - Simulated variants ([`SimulatedTrafficProvider`], [`SimulatedWeatherProvider`])
//!
//! # Fallback contract
//!
//! Live providers never surface transient network failures. After exhausting
//! their [`RetryPolicy`] they log a warning and answer with the documented
//! fallback values, so callers cannot tell real data from fallback data except
//! through the logs. A payload that arrives but has the wrong shape is a
//! different matter: it is reported as [`Error::DataFormat`](crate::Error::DataFormat)
//! and never replaced by a fallback.

mod aqicn;
mod http;
mod simulated;
mod tomtom;

pub use aqicn::{AqicnWeatherProvider, DEFAULT_AQICN_BASE_URL};
pub use http::RetryPolicy;
pub use simulated::{SimulatedTrafficProvider, SimulatedWeatherProvider};
pub use tomtom::{TomTomTrafficProvider, DEFAULT_TOMTOM_BASE_URL};

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Location, Observations};

/// Fallback route length: 50 km.
pub const FALLBACK_LENGTH_METERS: f64 = 50_000.0;
/// Fallback travel time: one hour.
pub const FALLBACK_TRAVEL_TIME_SECONDS: f64 = 3_600.0;
/// Fallback traffic delay: five minutes.
pub const FALLBACK_TRAFFIC_DELAY_SECONDS: f64 = 300.0;

pub const FALLBACK_PRECIPITATION: f64 = 0.0;
pub const FALLBACK_WIND_SPEED: f64 = 10.0;
pub const FALLBACK_TEMPERATURE: f64 = 25.0;
pub const FALLBACK_AQI: f64 = 50.0;

/// Supplies route length and travel times between two stops.
pub trait TrafficDataProvider {
    /// Route data for `start -> end`.
    ///
    /// Implementations resolve transient failures themselves (retry, then
    /// fallback). An `Err` means the answer could not be interpreted.
    fn get_route(&self, start: &Location, end: &Location) -> Result<TrafficResponse>;
}

/// Supplies weather and air-quality observations at a stop.
pub trait WeatherDataProvider {
    /// Conditions at `location`, with the same failure contract as
    /// [`TrafficDataProvider::get_route`].
    fn get_conditions(&self, location: &Location) -> Result<WeatherResponse>;
}

impl<T: TrafficDataProvider + ?Sized> TrafficDataProvider for &T {
    fn get_route(&self, start: &Location, end: &Location) -> Result<TrafficResponse> {
        (**self).get_route(start, end)
    }
}

impl<T: TrafficDataProvider + ?Sized> TrafficDataProvider for Box<T> {
    fn get_route(&self, start: &Location, end: &Location) -> Result<TrafficResponse> {
        (**self).get_route(start, end)
    }
}

impl<W: WeatherDataProvider + ?Sized> WeatherDataProvider for &W {
    fn get_conditions(&self, location: &Location) -> Result<WeatherResponse> {
        (**self).get_conditions(location)
    }
}

impl<W: WeatherDataProvider + ?Sized> WeatherDataProvider for Box<W> {
    fn get_conditions(&self, location: &Location) -> Result<WeatherResponse> {
        (**self).get_conditions(location)
    }
}

/// Route summary returned by a traffic provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrafficResponse {
    pub length_in_meters: f64,
    pub travel_time_in_seconds: f64,
    pub traffic_delay_in_seconds: f64,
}

impl TrafficResponse {
    /// The documented substitute used when live data is unavailable.
    pub fn fallback() -> Self {
        Self {
            length_in_meters: FALLBACK_LENGTH_METERS,
            travel_time_in_seconds: FALLBACK_TRAVEL_TIME_SECONDS,
            traffic_delay_in_seconds: FALLBACK_TRAFFIC_DELAY_SECONDS,
        }
    }

    /// Extract `routes[0].summary` from a routing payload.
    pub fn from_payload(provider: &'static str, payload: &Value) -> Result<Self> {
        let summary = payload
            .get("routes")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::data_format(provider, "missing 'routes' array"))?
            .first()
            .ok_or_else(|| Error::data_format(provider, "'routes' array is empty"))?
            .get("summary")
            .ok_or_else(|| Error::data_format(provider, "route is missing 'summary'"))?;

        Ok(Self {
            length_in_meters: non_negative_field(provider, summary, "lengthInMeters")?,
            travel_time_in_seconds: non_negative_field(provider, summary, "travelTimeInSeconds")?,
            traffic_delay_in_seconds: non_negative_field(
                provider,
                summary,
                "trafficDelayInSeconds",
            )?,
        })
    }
}

fn non_negative_field(provider: &'static str, object: &Value, key: &str) -> Result<f64> {
    let value = object
        .get(key)
        .ok_or_else(|| Error::data_format(provider, format!("summary is missing '{key}'")))?
        .as_f64()
        .ok_or_else(|| Error::data_format(provider, format!("'{key}' is not a number")))?;

    if !value.is_finite() || value < 0.0 {
        return Err(Error::data_format(
            provider,
            format!("'{key}' must be non-negative, got {value}"),
        ));
    }
    Ok(value)
}

/// Weather and air-quality observations returned by a weather provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherResponse {
    pub weather: Observations,
    pub air: Observations,
}

impl WeatherResponse {
    /// The documented substitute used when live data is unavailable.
    pub fn fallback() -> Self {
        Self {
            weather: Observations::from([
                ("precipitation".to_string(), FALLBACK_PRECIPITATION),
                ("wind_speed".to_string(), FALLBACK_WIND_SPEED),
                ("temperature".to_string(), FALLBACK_TEMPERATURE),
            ]),
            air: Observations::from([("aqi".to_string(), FALLBACK_AQI)]),
        }
    }

    /// Extract the `weather` and `air` objects from a payload.
    ///
    /// Both must be JSON objects. Numeric members are kept; other members are
    /// skipped.
    pub fn from_payload(provider: &'static str, payload: &Value) -> Result<Self> {
        Ok(Self {
            weather: numeric_members(provider, payload, "weather")?,
            air: numeric_members(provider, payload, "air")?,
        })
    }
}

fn numeric_members(provider: &'static str, payload: &Value, key: &str) -> Result<Observations> {
    let object = payload
        .get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| Error::data_format(provider, format!("missing '{key}' object")))?;

    Ok(object
        .iter()
        .filter_map(|(name, value)| value.as_f64().map(|number| (name.clone(), number)))
        .collect())
}
