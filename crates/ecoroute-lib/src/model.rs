//! Domain value types: vehicles, stops, route segments, and routes.
//!
//! Segments and routes keep their fields private so the derived quantities
//! (segment emissions, route totals) can only come from the constructors that
//! compute them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::emission::EmissionCalculator;
use crate::error::{Error, Result};

/// Named scalar observations such as `precipitation` or `aqi`.
pub type Observations = BTreeMap<String, f64>;

/// Fuel (or energy) source of a vehicle.
///
/// Only the exact lowercase names are recognized. Anything else, including
/// `"Diesel"` or `" diesel "`, is kept verbatim in [`FuelType::Other`] so the
/// emission calculator applies its unknown-fuel policy and the value is
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FuelType {
    Diesel,
    Electric,
    Hybrid,
    Other(String),
}

impl FuelType {
    pub fn as_str(&self) -> &str {
        match self {
            FuelType::Diesel => "diesel",
            FuelType::Electric => "electric",
            FuelType::Hybrid => "hybrid",
            FuelType::Other(raw) => raw,
        }
    }
}

impl From<String> for FuelType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "diesel" => FuelType::Diesel,
            "electric" => FuelType::Electric,
            "hybrid" => FuelType::Hybrid,
            _ => FuelType::Other(value),
        }
    }
}

impl From<&str> for FuelType {
    fn from(value: &str) -> Self {
        FuelType::from(value.to_string())
    }
}

impl From<FuelType> for String {
    fn from(value: FuelType) -> Self {
        match value {
            FuelType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivery vehicle and its current cargo state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub fuel_type: FuelType,
    /// Kilometres per litre. Informational; the emission formula does not use it.
    pub fuel_efficiency: f64,
    /// Kilograms.
    pub cargo_capacity: f64,
    /// Kilograms.
    pub current_load: f64,
}

impl Vehicle {
    /// Fraction of cargo capacity in use, or `None` when capacity is unusable.
    pub fn load_ratio(&self) -> Option<f64> {
        if self.cargo_capacity.is_finite() && self.cargo_capacity > 0.0 {
            Some(self.current_load / self.cargo_capacity)
        } else {
            None
        }
    }
}

/// A stop on the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub address: String,
}

impl Location {
    pub fn new(lat: f64, lon: f64, address: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            address: address.into(),
        }
    }

    /// Reject coordinates that are not finite numbers.
    ///
    /// Out-of-range latitudes or longitudes are left to the routing provider.
    pub fn validate(&self) -> Result<()> {
        if self.lat.is_finite() && self.lon.is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidLocation {
                address: self.address.clone(),
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

/// Portion of a route between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
    start: Location,
    end: Location,
    distance: f64,
    duration: f64,
    traffic_delay: f64,
    emissions: f64,
}

impl RouteSegment {
    /// Start building a segment between `start` and `end`.
    pub fn builder(start: Location, end: Location) -> RouteSegmentBuilder {
        RouteSegmentBuilder {
            start,
            end,
            distance_km: 0.0,
            duration_minutes: 0.0,
            traffic_delay_minutes: 0.0,
        }
    }

    pub fn start(&self) -> &Location {
        &self.start
    }

    pub fn end(&self) -> &Location {
        &self.end
    }

    /// Kilometres.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Minutes.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Minutes.
    pub fn traffic_delay(&self) -> f64 {
        self.traffic_delay
    }

    /// Kilograms of CO2.
    pub fn emissions(&self) -> f64 {
        self.emissions
    }
}

/// Collects the measured quantities of a segment before its emissions are known.
#[derive(Debug, Clone)]
pub struct RouteSegmentBuilder {
    start: Location,
    end: Location,
    distance_km: f64,
    duration_minutes: f64,
    traffic_delay_minutes: f64,
}

impl RouteSegmentBuilder {
    pub fn distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = distance_km;
        self
    }

    pub fn duration_minutes(mut self, duration_minutes: f64) -> Self {
        self.duration_minutes = duration_minutes;
        self
    }

    pub fn traffic_delay_minutes(mut self, traffic_delay_minutes: f64) -> Self {
        self.traffic_delay_minutes = traffic_delay_minutes;
        self
    }

    /// Compute the segment's emissions and return the finished segment.
    pub fn build(
        self,
        calculator: &EmissionCalculator,
        vehicle: &Vehicle,
        weather: &Observations,
    ) -> Result<RouteSegment> {
        let emissions = calculator.calculate_emissions(vehicle, self.distance_km, weather)?;
        Ok(RouteSegment {
            start: self.start,
            end: self.end,
            distance: self.distance_km,
            duration: self.duration_minutes,
            traffic_delay: self.traffic_delay_minutes,
            emissions,
        })
    }
}

/// Ordered segments with their aggregated cost and the conditions observed
/// at the destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    segments: Vec<RouteSegment>,
    total_distance: f64,
    total_duration: f64,
    total_emissions: f64,
    weather_conditions: Observations,
    air_quality: Observations,
}

impl Route {
    /// Build a route whose totals are the sums over `segments`.
    ///
    /// # Errors
    /// Returns [`Error::EmptyRoute`] when `segments` is empty.
    pub fn from_segments(
        segments: Vec<RouteSegment>,
        weather_conditions: Observations,
        air_quality: Observations,
    ) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::EmptyRoute);
        }

        let total_distance = segments.iter().map(RouteSegment::distance).sum();
        let total_duration = segments.iter().map(RouteSegment::duration).sum();
        let total_emissions = segments.iter().map(RouteSegment::emissions).sum();

        Ok(Self {
            segments,
            total_distance,
            total_duration,
            total_emissions,
            weather_conditions,
            air_quality,
        })
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn total_emissions(&self) -> f64 {
        self.total_emissions
    }

    pub fn total_traffic_delay(&self) -> f64 {
        self.segments.iter().map(RouteSegment::traffic_delay).sum()
    }

    pub fn weather_conditions(&self) -> &Observations {
        &self.weather_conditions
    }

    pub fn air_quality(&self) -> &Observations {
        &self.air_quality
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truck(fuel: &str) -> Vehicle {
        Vehicle {
            id: "T-1".to_string(),
            vehicle_type: "box_truck".to_string(),
            fuel_type: FuelType::from(fuel),
            fuel_efficiency: 4.5,
            cargo_capacity: 1000.0,
            current_load: 0.0,
        }
    }

    fn segment(distance_km: f64, minutes: f64) -> RouteSegment {
        RouteSegment::builder(Location::new(0.0, 0.0, "A"), Location::new(1.0, 1.0, "B"))
            .distance_km(distance_km)
            .duration_minutes(minutes)
            .traffic_delay_minutes(2.0)
            .build(
                &EmissionCalculator::default(),
                &truck("diesel"),
                &Observations::new(),
            )
            .expect("valid segment")
    }

    #[test]
    fn fuel_type_matches_exact_names_only() {
        assert_eq!(FuelType::from("diesel"), FuelType::Diesel);
        assert_eq!(FuelType::from("electric"), FuelType::Electric);
        assert_eq!(FuelType::from("hybrid"), FuelType::Hybrid);
        for raw in ["Diesel", " diesel ", "HYBRID", "hydrogen"] {
            assert_eq!(FuelType::from(raw), FuelType::Other(raw.to_string()));
        }
    }

    #[test]
    fn mixed_case_fuel_keeps_raw_value_and_emits_nothing() {
        let json = r#"{
            "id": "TRK-8",
            "type": "semi",
            "fuel_type": "Diesel",
            "fuel_efficiency": 3.5,
            "cargo_capacity": 1000,
            "current_load": 0
        }"#;
        let vehicle: Vehicle = serde_json::from_str(json).expect("vehicle parses");
        assert_eq!(vehicle.fuel_type, FuelType::Other("Diesel".to_string()));

        let kg = EmissionCalculator::default()
            .calculate_emissions(&vehicle, 100.0, &Observations::new())
            .expect("default policy accepts unknown fuel");
        assert_eq!(kg, 0.0);

        let value = serde_json::to_value(&vehicle).expect("serializes");
        assert_eq!(value["fuel_type"], "Diesel");

        let padded = Vehicle {
            fuel_type: FuelType::from(" diesel "),
            ..vehicle
        };
        let value = serde_json::to_value(&padded).expect("serializes");
        assert_eq!(value["fuel_type"], " diesel ");
    }

    #[test]
    fn vehicle_deserializes_from_input_shape() {
        let json = r#"{
            "id": "TRK-7",
            "type": "semi",
            "fuel_type": "hybrid",
            "fuel_efficiency": 3.2,
            "cargo_capacity": 20000,
            "current_load": 5000
        }"#;
        let vehicle: Vehicle = serde_json::from_str(json).expect("vehicle parses");
        assert_eq!(vehicle.vehicle_type, "semi");
        assert_eq!(vehicle.fuel_type, FuelType::Hybrid);
        assert_eq!(vehicle.load_ratio(), Some(0.25));

        let value = serde_json::to_value(&vehicle).expect("serializes");
        assert_eq!(value["type"], "semi");
        assert_eq!(value["fuel_type"], "hybrid");
    }

    #[test]
    fn load_ratio_is_none_for_zero_capacity() {
        let mut vehicle = truck("diesel");
        vehicle.cargo_capacity = 0.0;
        assert_eq!(vehicle.load_ratio(), None);
    }

    #[test]
    fn location_validate_rejects_nan() {
        assert!(Location::new(52.5, 13.4, "Berlin").validate().is_ok());
        let err = Location::new(f64::NAN, 13.4, "nowhere")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLocation { .. }));
    }

    #[test]
    fn builder_computes_emissions() {
        let seg = segment(100.0, 60.0);
        assert!((seg.emissions() - 90.0).abs() < 1e-9);
        assert_eq!(seg.traffic_delay(), 2.0);
    }

    #[test]
    fn route_totals_sum_segments() {
        let route = Route::from_segments(
            vec![segment(10.0, 15.0), segment(30.0, 45.0)],
            Observations::new(),
            Observations::new(),
        )
        .expect("non-empty route");

        assert_eq!(route.segments().len(), 2);
        assert!((route.total_distance() - 40.0).abs() < 1e-9);
        assert!((route.total_duration() - 60.0).abs() < 1e-9);
        assert!((route.total_emissions() - 36.0).abs() < 1e-9);
        assert!((route.total_traffic_delay() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn route_requires_a_segment() {
        let err = Route::from_segments(Vec::new(), Observations::new(), Observations::new())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyRoute));
    }
}
