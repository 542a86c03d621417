//! Condensed, serialisable view of a costed route.

use serde::Serialize;

use crate::model::{Observations, Route};

/// Precipitation above which a route carries a weather alert.
pub const PRECIPITATION_ALERT_THRESHOLD: f64 = 10.0;
/// Wind speed above which a route carries a weather alert.
pub const WIND_ALERT_THRESHOLD: f64 = 30.0;
/// AQI above which a route carries an air-quality alert.
pub const AQI_ALERT_THRESHOLD: f64 = 100.0;

/// Headline figures and alert flags for one route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSummary {
    pub total_distance_km: f64,
    pub total_duration_mins: f64,
    pub total_emissions_kg: f64,
    pub weather_alerts: bool,
    pub air_quality_alerts: bool,
}

impl RouteSummary {
    pub fn from_route(route: &Route) -> Self {
        let weather = route.weather_conditions();
        let weather_alerts = observed(weather, "precipitation") > PRECIPITATION_ALERT_THRESHOLD
            || observed(weather, "wind_speed") > WIND_ALERT_THRESHOLD;

        Self {
            total_distance_km: route.total_distance(),
            total_duration_mins: route.total_duration(),
            total_emissions_kg: route.total_emissions(),
            weather_alerts,
            air_quality_alerts: observed(route.air_quality(), "aqi") > AQI_ALERT_THRESHOLD,
        }
    }
}

fn observed(observations: &Observations, key: &str) -> f64 {
    observations.get(key).copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emission::EmissionCalculator;
    use crate::model::{FuelType, Location, RouteSegment, Vehicle};

    fn route(weather: &[(&str, f64)], air: &[(&str, f64)]) -> Route {
        let vehicle = Vehicle {
            id: "V".to_string(),
            vehicle_type: "van".to_string(),
            fuel_type: FuelType::Hybrid,
            fuel_efficiency: 8.0,
            cargo_capacity: 500.0,
            current_load: 0.0,
        };
        let weather: Observations = weather.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        let air: Observations = air.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        let segment = RouteSegment::builder(Location::new(0.0, 0.0, "A"), Location::new(0.0, 1.0, "B"))
            .distance_km(10.0)
            .duration_minutes(12.0)
            .build(&EmissionCalculator::default(), &vehicle, &weather)
            .unwrap();
        Route::from_segments(vec![segment], weather, air).unwrap()
    }

    #[test]
    fn calm_route_has_no_alerts() {
        let summary = RouteSummary::from_route(&route(
            &[("precipitation", 10.0), ("wind_speed", 30.0)],
            &[("aqi", 100.0)],
        ));
        assert!(!summary.weather_alerts);
        assert!(!summary.air_quality_alerts);
        assert_eq!(summary.total_distance_km, 10.0);
        assert_eq!(summary.total_duration_mins, 12.0);
    }

    #[test]
    fn thresholds_trigger_alerts() {
        let rainy = RouteSummary::from_route(&route(&[("precipitation", 10.5)], &[]));
        assert!(rainy.weather_alerts);

        let windy = RouteSummary::from_route(&route(&[("wind_speed", 31.0)], &[]));
        assert!(windy.weather_alerts);

        let smoggy = RouteSummary::from_route(&route(&[], &[("aqi", 151.0)]));
        assert!(smoggy.air_quality_alerts);
        assert!(!smoggy.weather_alerts);
    }
}
