//! CO2 emission estimation for a single route segment.
//!
//! Formula: emissions_kg = distance_km × factor(fuel) × weather_multiplier × load_multiplier
//!
//! - factor: diesel 0.9, electric 0.0, hybrid 0.6 kg CO2/km
//! - weather_multiplier: ×1.10 when `precipitation` > 0, ×1.15 when `wind_speed` > 20
//! - load_multiplier: 1 + (current_load / cargo_capacity) × 0.2

use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{FuelType, Observations, Vehicle};

/// kg CO2 per km for diesel trucks.
pub const DIESEL_FACTOR: f64 = 0.9;
/// kg CO2 per km for battery-electric trucks (tailpipe only).
pub const ELECTRIC_FACTOR: f64 = 0.0;
/// kg CO2 per km for hybrid trucks.
pub const HYBRID_FACTOR: f64 = 0.6;

pub const PRECIPITATION_MULTIPLIER: f64 = 1.10;
pub const WIND_MULTIPLIER: f64 = 1.15;
/// Wind speed above which the wind multiplier applies.
pub const HIGH_WIND_THRESHOLD: f64 = 20.0;
/// Extra emissions at full cargo load, as a fraction of the base.
pub const FULL_LOAD_PENALTY: f64 = 0.2;

/// How to treat a fuel type missing from the factor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFuelPolicy {
    /// Use a factor of zero and log a warning.
    #[default]
    ZeroEmission,
    /// Fail with [`Error::UnknownFuelType`].
    Reject,
}

/// Stateless emission estimator configured with an unknown-fuel policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmissionCalculator {
    unknown_fuel: UnknownFuelPolicy,
}

impl EmissionCalculator {
    pub fn new(unknown_fuel: UnknownFuelPolicy) -> Self {
        Self { unknown_fuel }
    }

    pub fn unknown_fuel_policy(&self) -> UnknownFuelPolicy {
        self.unknown_fuel
    }

    /// Estimate kg CO2 emitted by `vehicle` over `distance_km` under `weather`.
    ///
    /// Missing `precipitation` / `wind_speed` keys count as zero.
    ///
    /// # Errors
    /// - [`Error::InvalidDistance`] for a negative or non-finite distance.
    /// - [`Error::InvalidCargoCapacity`] when capacity is not a finite value > 0.
    /// - [`Error::UnknownFuelType`] under [`UnknownFuelPolicy::Reject`].
    pub fn calculate_emissions(
        &self,
        vehicle: &Vehicle,
        distance_km: f64,
        weather: &Observations,
    ) -> Result<f64> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(Error::InvalidDistance {
                distance: distance_km,
            });
        }

        let factor = self.emission_factor(vehicle)?;
        let load = load_multiplier(vehicle)?;
        let base = distance_km * factor;

        Ok(base * weather_multiplier(weather) * load)
    }

    /// Emission factor (kg CO2/km) for the vehicle's fuel type.
    pub fn emission_factor(&self, vehicle: &Vehicle) -> Result<f64> {
        match known_emission_factor(&vehicle.fuel_type) {
            Some(factor) => Ok(factor),
            None => match self.unknown_fuel {
                UnknownFuelPolicy::ZeroEmission => {
                    warn!(
                        vehicle = %vehicle.id,
                        fuel_type = %vehicle.fuel_type,
                        "unknown fuel type; assuming zero emissions"
                    );
                    Ok(0.0)
                }
                UnknownFuelPolicy::Reject => Err(Error::UnknownFuelType {
                    vehicle_id: vehicle.id.clone(),
                    fuel_type: vehicle.fuel_type.to_string(),
                }),
            },
        }
    }
}

/// Factor table lookup; `None` for fuel types without a published factor.
pub fn known_emission_factor(fuel_type: &FuelType) -> Option<f64> {
    match fuel_type {
        FuelType::Diesel => Some(DIESEL_FACTOR),
        FuelType::Electric => Some(ELECTRIC_FACTOR),
        FuelType::Hybrid => Some(HYBRID_FACTOR),
        FuelType::Other(_) => None,
    }
}

/// Combined weather adjustment. Both adjustments compose multiplicatively.
pub fn weather_multiplier(weather: &Observations) -> f64 {
    let precipitation = weather.get("precipitation").copied().unwrap_or(0.0);
    let wind_speed = weather.get("wind_speed").copied().unwrap_or(0.0);

    let mut multiplier = 1.0;
    if precipitation > 0.0 {
        multiplier *= PRECIPITATION_MULTIPLIER;
    }
    if wind_speed > HIGH_WIND_THRESHOLD {
        multiplier *= WIND_MULTIPLIER;
    }
    multiplier
}

/// Cargo load adjustment: 1.0 when empty, 1.2 at full capacity.
pub fn load_multiplier(vehicle: &Vehicle) -> Result<f64> {
    let ratio = vehicle
        .load_ratio()
        .ok_or_else(|| Error::InvalidCargoCapacity {
            vehicle_id: vehicle.id.clone(),
            capacity: vehicle.cargo_capacity,
        })?;
    Ok(1.0 + ratio * FULL_LOAD_PENALTY)
}
