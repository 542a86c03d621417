use tracing::debug;

use crate::error::Result;
use crate::model::Location;

use super::{TrafficDataProvider, TrafficResponse, WeatherDataProvider, WeatherResponse};

/// Offline traffic provider that always answers with the fallback route data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedTrafficProvider;

impl TrafficDataProvider for SimulatedTrafficProvider {
    fn get_route(&self, start: &Location, end: &Location) -> Result<TrafficResponse> {
        debug!(from = %start.address, to = %end.address, "simulated route data");
        Ok(TrafficResponse::fallback())
    }
}

/// Offline weather provider that always answers with the fallback conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedWeatherProvider;

impl WeatherDataProvider for SimulatedWeatherProvider {
    fn get_conditions(&self, location: &Location) -> Result<WeatherResponse> {
        debug!(at = %location.address, "simulated weather data");
        Ok(WeatherResponse::fallback())
    }
}
