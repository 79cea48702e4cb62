use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracker::{replay_source::ReplaySource, session::TrackingSession};
use workout_tracker_lib::workout;

mod gpx_util;
mod synthetic;

#[derive(Parser)]
#[command(name = "replay")]
#[command(about = "Replay a route through the workout tracker", long_about = None)]
struct Cli {
    /// Time compression: at 10, a second of recording passes in 100 ms
    #[arg(long, default_value_t = 10.0)]
    speed: f64,

    /// Print the final summary as JSON and nothing else
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the track points of a GPX file
    Gpx { path: PathBuf },
    /// Replay a generated loop around a fixed start point
    Synthetic {
        /// Number of fixes in the loop
        #[arg(long, default_value_t = 120)]
        points: usize,
        /// Loop radius in meters
        #[arg(long, default_value_t = 400.0)]
        radius_m: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=trace", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.speed > 0.0, "--speed must be positive");

    let route = match &cli.command {
        Commands::Gpx { path } => gpx_util::read_gpx(path)?,
        Commands::Synthetic { points, radius_m } => {
            synthetic::loop_route(37.768, -122.483, *points, *radius_m)
        }
    };
    anyhow::ensure!(!route.is_empty(), "route has no points");
    tracing::info!("Replaying {} fixes at {}x speed", route.len(), cli.speed);

    let fix_interval = Duration::from_secs_f64(1.0 / cli.speed);
    let source = Arc::new(ReplaySource::new(route).with_fix_interval(fix_interval));
    let mut session = TrackingSession::new(source);
    session.start().await?;

    // Stats once a second until the route runs out, like the live screen.
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        ticker.tick().await;
        let snapshot = session.snapshot().await;
        if !cli.json {
            println!(
                "Time {} | Distance {:.2} km | {} points",
                workout::format_elapsed(snapshot.elapsed_secs),
                snapshot.distance_km,
                snapshot.route.len()
            );
        }
        if snapshot.stream_error.is_some() {
            break;
        }
    }

    let summary = session.stop().await.context("session was not running")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        println!("Workout complete!");
        println!("  Distance:     {} km", summary.distance_km);
        println!("  Time:         {}", summary.format_duration());
        println!("  Route points: {}", summary.route.len());
    }

    Ok(())
}
