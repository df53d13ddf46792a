//! Headless travel globe demo
//!
//! Loads the sample destinations, runs a scripted hand tracking session and
//! a short gesture tour, then prints what happened.
//!
//! Usage:
//!   travel-demo                         # Defaults, human readable summary
//!   travel-demo --config travel.toml    # Custom tunables
//!   travel-demo --segments 64 --json    # Finer arcs, JSON on stdout
//!
//! Set RUST_LOG (e.g. `RUST_LOG=debug`) for more detail.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spatial_travel_app::{run_demo, RunOptions, SessionReport};
use spatial_travel_oui::config::InteractionConfig;

#[derive(Parser, Debug)]
#[command(name = "travel-demo", version, about = "Headless spatial travel globe session")]
struct Args {
    /// TOML config file. Falls back to $SPATIAL_TRAVEL_CONFIG, then the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Highlight frames to run while dwelling on the picked destination
    #[arg(long, default_value_t = 30)]
    ticks: u32,

    /// Override the number of arc segments
    #[arg(long)]
    segments: Option<usize>,

    /// Print the session report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config =
        InteractionConfig::load(args.config.as_deref()).context("failed to load config")?;
    if let Some(segments) = args.segments {
        config.arc.segments = segments;
        config.validate().context("invalid --segments")?;
    }

    let report = run_demo(RunOptions {
        config,
        ticks: args.ticks,
    })
    .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &SessionReport) {
    println!("=== Travel globe session ===\n");
    for marker in &report.markers {
        let flag = if marker.highlighted { "*" } else { " " };
        println!(
            "{flag} {:<10} scale {:.3}  at ({:+.3}, {:+.3}, {:+.3})",
            marker.name, marker.scale, marker.position[0], marker.position[1], marker.position[2]
        );
    }

    println!();
    for flight in &report.flights {
        println!(
            "  flight {} -> {}: {:.0} km, {} points, apex {:.3}",
            flight.from,
            flight.to,
            flight.distance_km,
            flight.path.len(),
            flight.path.apex_radius()
        );
    }

    println!();
    println!("pinch events: {}", report.pinch_events);
    println!("input method: {}", report.active_method);
    println!("globe yaw:    {:.3} rad", report.globe_yaw);
    match &report.selected {
        Some(name) => println!("selected:     {name}"),
        None => println!("selected:     nothing"),
    }
}
