//! Plan command handler: cost an itinerary and write the route output file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use ecoroute_lib::{
    load_itinerary, load_vehicle, save_routes, Config, EmissionCalculator, Route, RouteOptimizer,
    RouteSummary, SegmentationPolicy, SimulatedTrafficProvider, SimulatedWeatherProvider,
    TrafficDataProvider, UnknownFuelPolicy, WeatherDataProvider,
};

use crate::output::{render_routes, OutputFormat};

/// Arguments for the plan command.
#[derive(Debug, Clone)]
pub struct PlanCommandArgs {
    /// Vehicle JSON file.
    pub vehicle: PathBuf,
    /// Locations JSON file; the first entry is the start.
    pub locations: PathBuf,
    /// Where to write the route output JSON.
    pub output: PathBuf,
    /// Use simulated providers instead of the live APIs.
    pub offline: bool,
    /// Coalesce every leg into a single route.
    pub itinerary: bool,
    /// Fail on fuel types without an emission factor.
    pub reject_unknown_fuel: bool,
    /// Stdout format.
    pub format: OutputFormat,
}

impl PlanCommandArgs {
    fn segmentation(&self) -> SegmentationPolicy {
        if self.itinerary {
            SegmentationPolicy::Itinerary
        } else {
            SegmentationPolicy::PerLeg
        }
    }

    fn calculator(&self) -> EmissionCalculator {
        if self.reject_unknown_fuel {
            EmissionCalculator::new(UnknownFuelPolicy::Reject)
        } else {
            EmissionCalculator::new(UnknownFuelPolicy::ZeroEmission)
        }
    }
}

type Providers = (Box<dyn TrafficDataProvider>, Box<dyn WeatherDataProvider>);

fn build_providers(offline: bool) -> Result<Providers> {
    if offline {
        info!("offline mode: using simulated traffic and weather data");
        return Ok((
            Box::new(SimulatedTrafficProvider),
            Box::new(SimulatedWeatherProvider),
        ));
    }

    let config = Config::from_env().context("failed to load provider configuration")?;
    Ok((
        Box::new(config.traffic_provider()?),
        Box::new(config.weather_provider()?),
    ))
}

/// Handle the plan subcommand.
///
/// Inputs are loaded before any provider is contacted; a failure at any
/// step aborts without writing a partial output file.
pub fn handle_plan_command(args: &PlanCommandArgs) -> Result<()> {
    let vehicle = load_vehicle(&args.vehicle).context("failed to load vehicle data")?;
    info!(vehicle = %vehicle.id, "loaded vehicle data");

    let itinerary = load_itinerary(&args.locations).context("failed to load locations")?;
    info!(locations = itinerary.destinations.len() + 1, "loaded locations");

    let (traffic, weather) = build_providers(args.offline)?;
    let optimizer = RouteOptimizer::new(traffic, weather)
        .with_calculator(args.calculator())
        .with_segmentation(args.segmentation());

    info!(vehicle = %vehicle.id, "planning routes");
    let routes = optimizer
        .optimize_route(&vehicle, &itinerary.start, &itinerary.destinations)
        .map_err(|err| {
            error!(vehicle = %vehicle.id, error = %err, "route planning failed");
            err
        })
        .context("route planning failed")?;

    log_summaries(&routes);
    render_routes(&routes, args.format).context("failed to write route summary")?;

    save_routes(&routes, &args.output)
        .with_context(|| format!("failed to save route data to {}", args.output.display()))?;
    info!(path = %args.output.display(), "route data saved");
    Ok(())
}

fn log_summaries(routes: &[Route]) {
    for (index, route) in routes.iter().enumerate() {
        let number = index + 1;
        let summary = RouteSummary::from_route(route);
        info!(
            route = number,
            distance_km = summary.total_distance_km,
            duration_mins = summary.total_duration_mins,
            emissions_kg = summary.total_emissions_kg,
            "route summary"
        );
        if summary.weather_alerts {
            warn!(route = number, "weather alerts present");
        }
        if summary.air_quality_alerts {
            warn!(route = number, "air quality alerts present");
        }
    }
}
