//! Output formatting for planned routes.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use ecoroute_lib::{Route, RouteSummary};

/// How planned routes are printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON array of route summaries.
    Json,
}

/// Log line format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct NumberedSummary<'a> {
    route: usize,
    from: &'a str,
    to: &'a str,
    #[serde(flatten)]
    summary: RouteSummary,
}

/// Render route summaries in the requested format.
pub fn render_routes(routes: &[Route], format: OutputFormat) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => render_text(&mut stdout, routes),
        OutputFormat::Json => render_json(&mut stdout, routes),
    }
}

/// Human-friendly route listing.
pub fn render_text<W: Write>(out: &mut W, routes: &[Route]) -> io::Result<()> {
    if routes.is_empty() {
        writeln!(out, "No destinations to plan.")?;
        return Ok(());
    }

    for (index, route) in routes.iter().enumerate() {
        let summary = RouteSummary::from_route(route);
        let (from, to) = endpoints(route);
        writeln!(out, "Route {}: {} -> {}", index + 1, from, to)?;
        writeln!(out, "  Distance:  {:.2} km", summary.total_distance_km)?;
        writeln!(out, "  Duration:  {:.2} minutes", summary.total_duration_mins)?;
        writeln!(out, "  Emissions: {:.2} kg CO2", summary.total_emissions_kg)?;
        if summary.weather_alerts {
            writeln!(out, "  ! weather alert")?;
        }
        if summary.air_quality_alerts {
            writeln!(out, "  ! air quality alert")?;
        }
    }

    let distance: f64 = routes.iter().map(Route::total_distance).sum();
    let emissions: f64 = routes.iter().map(Route::total_emissions).sum();
    writeln!(
        out,
        "\nTotal: {:.2} km, {:.2} kg CO2 across {} route(s)",
        distance,
        emissions,
        routes.len()
    )
}

/// JSON route summaries.
pub fn render_json<W: Write>(out: &mut W, routes: &[Route]) -> io::Result<()> {
    let summaries: Vec<NumberedSummary<'_>> = routes
        .iter()
        .enumerate()
        .map(|(index, route)| {
            let (from, to) = endpoints(route);
            NumberedSummary {
                route: index + 1,
                from,
                to,
                summary: RouteSummary::from_route(route),
            }
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &summaries).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

fn endpoints(route: &Route) -> (&str, &str) {
    let from = route
        .segments()
        .first()
        .map(|segment| segment.start().address.as_str())
        .unwrap_or("<unknown>");
    let to = route
        .segments()
        .last()
        .map(|segment| segment.end().address.as_str())
        .unwrap_or("<unknown>");
    (from, to)
}
