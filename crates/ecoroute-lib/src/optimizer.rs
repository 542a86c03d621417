//! Turns an ordered list of stops into costed routes.
//!
//! Stops are visited in the order given; the optimizer never reorders them.
//! For every consecutive pair it asks the traffic provider for the leg, asks
//! the weather provider for the destination's conditions, and derives the
//! leg's emissions from both.
//!
//! # Example
//!
//! ```
//! use ecoroute_lib::{
//!     FuelType, Location, RouteOptimizer, SimulatedTrafficProvider, SimulatedWeatherProvider,
//!     Vehicle,
//! };
//!
//! let optimizer = RouteOptimizer::new(SimulatedTrafficProvider, SimulatedWeatherProvider);
//! let vehicle = Vehicle {
//!     id: "TRK-1".into(),
//!     vehicle_type: "box_truck".into(),
//!     fuel_type: FuelType::Diesel,
//!     fuel_efficiency: 4.0,
//!     cargo_capacity: 1000.0,
//!     current_load: 0.0,
//! };
//! let depot = Location::new(40.71, -74.00, "Depot");
//! let stops = [Location::new(40.73, -73.99, "Stop 1")];
//!
//! let routes = optimizer.optimize_route(&vehicle, &depot, &stops).unwrap();
//! assert_eq!(routes.len(), 1);
//! assert_eq!(routes[0].total_distance(), 50.0);
//! ```

use tracing::{debug, info};

use crate::emission::EmissionCalculator;
use crate::error::Result;
use crate::model::{Location, Route, RouteSegment, Vehicle};
use crate::provider::{TrafficDataProvider, TrafficResponse, WeatherDataProvider, WeatherResponse};

/// How legs are grouped into [`Route`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentationPolicy {
    /// One single-segment route per consecutive stop pair.
    #[default]
    PerLeg,
    /// One route holding every leg; conditions come from the final stop.
    Itinerary,
}

/// Orchestrates provider lookups and emission estimates across a stop list.
#[derive(Debug, Clone)]
pub struct RouteOptimizer<T, W> {
    traffic: T,
    weather: W,
    calculator: EmissionCalculator,
    segmentation: SegmentationPolicy,
}

impl<T, W> RouteOptimizer<T, W>
where
    T: TrafficDataProvider,
    W: WeatherDataProvider,
{
    pub fn new(traffic: T, weather: W) -> Self {
        Self {
            traffic,
            weather,
            calculator: EmissionCalculator::default(),
            segmentation: SegmentationPolicy::default(),
        }
    }

    pub fn with_calculator(mut self, calculator: EmissionCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn with_segmentation(mut self, segmentation: SegmentationPolicy) -> Self {
        self.segmentation = segmentation;
        self
    }

    pub fn segmentation(&self) -> SegmentationPolicy {
        self.segmentation
    }

    /// Cost every leg of `start -> destinations[0] -> destinations[1] -> ...`.
    ///
    /// Returns no routes (and makes no provider calls) when `destinations`
    /// is empty. Under [`SegmentationPolicy::PerLeg`] the result holds one
    /// route per destination, in input order.
    ///
    /// # Errors
    /// A stop with non-finite coordinates is rejected with
    /// [`Error::InvalidLocation`](crate::Error::InvalidLocation) before any
    /// provider is called. Any provider or emission error aborts the whole
    /// request; partially costed itineraries are never returned.
    pub fn optimize_route(
        &self,
        vehicle: &Vehicle,
        start: &Location,
        destinations: &[Location],
    ) -> Result<Vec<Route>> {
        if destinations.is_empty() {
            debug!(vehicle = %vehicle.id, "no destinations; nothing to plan");
            return Ok(Vec::new());
        }
        start.validate()?;
        for destination in destinations {
            destination.validate()?;
        }

        let mut legs = Vec::with_capacity(destinations.len());
        let mut current = start;

        for destination in destinations {
            let traffic = self.traffic.get_route(current, destination)?;
            let conditions = self.weather.get_conditions(destination)?;
            let segment = self.build_segment(vehicle, current, destination, &traffic, &conditions)?;

            debug!(
                from = %current.address,
                to = %destination.address,
                distance_km = segment.distance(),
                emissions_kg = segment.emissions(),
                "costed leg"
            );

            legs.push((segment, conditions));
            current = destination;
        }

        let routes = match self.segmentation {
            SegmentationPolicy::PerLeg => legs
                .into_iter()
                .map(|(segment, conditions)| {
                    Route::from_segments(vec![segment], conditions.weather, conditions.air)
                })
                .collect::<Result<Vec<_>>>()?,
            SegmentationPolicy::Itinerary => {
                let (weather, air) = legs
                    .last()
                    .map(|(_, conditions)| (conditions.weather.clone(), conditions.air.clone()))
                    .unwrap_or_default();
                let segments = legs.into_iter().map(|(segment, _)| segment).collect();
                vec![Route::from_segments(segments, weather, air)?]
            }
        };

        info!(
            vehicle = %vehicle.id,
            stops = destinations.len(),
            routes = routes.len(),
            "planned route"
        );
        Ok(routes)
    }

    fn build_segment(
        &self,
        vehicle: &Vehicle,
        from: &Location,
        to: &Location,
        traffic: &TrafficResponse,
        conditions: &WeatherResponse,
    ) -> Result<RouteSegment> {
        RouteSegment::builder(from.clone(), to.clone())
            .distance_km(traffic.length_in_meters / 1000.0)
            .duration_minutes(traffic.travel_time_in_seconds / 60.0)
            .traffic_delay_minutes(traffic.traffic_delay_in_seconds / 60.0)
            .build(&self.calculator, vehicle, &conditions.weather)
    }
}
