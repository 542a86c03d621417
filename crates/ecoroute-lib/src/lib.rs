//! ecoroute library entry points.
//!
//! This crate costs a delivery truck's itinerary: it combines routing and
//! traffic data with weather and air-quality observations, and estimates
//! per-leg CO2 emissions adjusted for weather and cargo load. Higher-level
//! consumers (the CLI) should only depend on the items exported here instead
//! of reimplementing behavior.

#![deny(warnings)]

pub mod config;
pub mod emission;
pub mod error;
pub mod io;
pub mod model;
pub mod optimizer;
pub mod provider;
pub mod summary;

pub use config::{Config, ProviderSettings};
pub use emission::{EmissionCalculator, UnknownFuelPolicy};
pub use error::{Error, Result};
pub use io::{load_itinerary, load_locations, load_vehicle, save_routes, Itinerary};
pub use model::{FuelType, Location, Observations, Route, RouteSegment, Vehicle};
pub use optimizer::{RouteOptimizer, SegmentationPolicy};
pub use provider::{
    AqicnWeatherProvider, RetryPolicy, SimulatedTrafficProvider, SimulatedWeatherProvider,
    TomTomTrafficProvider, TrafficDataProvider, TrafficResponse, WeatherDataProvider,
    WeatherResponse,
};
pub use summary::RouteSummary;
