use clap::Parser;
use landing_sim::config::SimulationConfig;
use landing_sim::events::TracingSink;
use landing_sim::fleet::FleetGenerator;
use landing_sim::lifecycle::{setup_tracing, LandingSimulation};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(about = "Simulates vehicles contending for exclusive landing tracks")]
struct Args {
    /// Path to a JSON config file; defaults apply to anything it leaves out
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of landing tracks (overrides the config file)
    #[arg(short, long)]
    tracks: Option<usize>,

    /// Seed for the fleet and all delays, for a repeatable run
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(tracks) = args.tracks {
        config.tracks = tracks;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut fleet = FleetGenerator::from_config(&config);
    let airport = fleet.airport(&config);
    info!(airport = %airport.name, tracks = airport.tracks.len(), "Airport ready");
    for track in &airport.tracks {
        info!(track = %track.id, "Track open");
    }

    let vehicles = fleet.vehicles();
    for vehicle in &vehicles {
        info!(
            vehicle = %vehicle.id,
            kind = %vehicle.kind,
            passengers = vehicle.passengers,
            "Inbound"
        );
    }

    let simulation = LandingSimulation::new(&airport, config, Arc::new(TracingSink))?;

    let cancel = simulation.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, sending vehicles away");
            cancel.trigger();
        }
    });

    let result = simulation.run(vehicles).await;
    simulation.shutdown().await?;

    let report = result?;
    report.log_summary();
    Ok(())
}
