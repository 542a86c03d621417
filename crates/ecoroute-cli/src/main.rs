use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ecoroute_cli::commands::plan::{handle_plan_command, PlanCommandArgs};
use ecoroute_cli::output::{LogFormat, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Delivery-truck route cost and emission estimator")]
struct Cli {
    /// Log line format written to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cost every leg of an itinerary and save the routes as JSON.
    Plan {
        /// Vehicle JSON file.
        #[arg(long, env = "ECOROUTE_VEHICLE_FILE", default_value = "vehicle_data.json")]
        vehicle: PathBuf,
        /// Locations JSON array; the first entry is the starting point.
        #[arg(long, env = "ECOROUTE_LOCATIONS_FILE", default_value = "locations.json")]
        locations: PathBuf,
        /// Route output JSON file.
        #[arg(long, env = "ECOROUTE_OUTPUT_FILE", default_value = "route_output.json")]
        output: PathBuf,
        /// Use simulated traffic and weather data instead of the live APIs.
        #[arg(long)]
        offline: bool,
        /// Combine all legs into a single multi-segment route.
        #[arg(long)]
        itinerary: bool,
        /// Fail when the vehicle's fuel type has no emission factor.
        #[arg(long)]
        reject_unknown_fuel: bool,
        /// Stdout format for the route summaries.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Command::Plan {
            vehicle,
            locations,
            output,
            offline,
            itinerary,
            reject_unknown_fuel,
            format,
        } => handle_plan_command(&PlanCommandArgs {
            vehicle,
            locations,
            output,
            offline,
            itinerary,
            reject_unknown_fuel,
            format,
        }),
    }
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    };
}
