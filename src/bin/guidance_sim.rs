//! End-to-end guidance demo against simulated sensors: a seeded GPS walk
//! and magnetometer feed a session over a channel, and formatted readouts
//! go to stdout at the configured rate.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::{RecvTimeoutError, bounded};
use serde::Deserialize;

use arcompass::config::{GuidanceConfig, LatLon};
use arcompass::destinations::{Destination, DestinationKind};
use arcompass::guidance::{GuidanceEvent, GuidancePhase, GuidanceSession};
use arcompass::output::{GuidanceReadout, OutputFormat, create_formatter};
use arcompass::simulation::{CompassConfig, SimulatedCompass, SimulatedWalk, WalkConfig};

#[derive(Parser, Debug)]
#[command(name = "guidance_sim")]
#[command(about = "Run a guidance session against a simulated walk", long_about = None)]
struct Args {
    /// Destination preset from the emergency-resource catalog
    #[arg(short = 'p', long, value_enum, default_value = "hospital")]
    preset: DestinationKind,

    /// Destination as "lat,lon" (overrides --preset)
    #[arg(short = 'd', long)]
    destination: Option<LatLon>,

    /// Label for an explicit --destination
    #[arg(long, default_value = "destination")]
    label: String,

    /// Start position as "lat,lon"
    #[arg(short = 's', long, default_value = "1.2700,103.8400")]
    start: LatLon,

    /// Initial compass heading in degrees
    #[arg(long, default_value = "45.0")]
    heading: f64,

    /// Compass turn rate in degrees per second
    #[arg(long)]
    turn_rate: Option<f64>,

    /// Simulation duration in seconds
    #[arg(long, default_value = "30")]
    duration_secs: u64,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// TOML config file overriding engine and simulation defaults
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// RNG seed for both simulators
    #[arg(long)]
    seed: Option<u64>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SimConfig {
    guidance: GuidanceConfig,
    walk: WalkConfig,
    compass: CompassConfig,
}

fn load_sim_config(path: &PathBuf) -> anyhow::Result<SimConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut sim_config = match args.config {
        Some(ref path) => load_sim_config(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        sim_config.walk.seed = seed;
        sim_config.compass.seed = seed.wrapping_add(1);
    }
    if let Some(turn_rate) = args.turn_rate {
        sim_config.compass.turn_rate_dps = turn_rate;
    }

    let destination = match args.destination {
        Some(point) => Destination::new(args.label.clone(), point.point()),
        None => args.preset.preset(),
    };

    eprintln!("=== arcompass guidance simulation ===");
    eprintln!("Destination: {} ({})", destination.label, destination.point);
    eprintln!("Start: {}", args.start.point());
    eprintln!(
        "Walk: {:.1} m/s, fix every {} ms, noise {:.1} m",
        sim_config.walk.speed_mps, sim_config.walk.fix_interval_ms, sim_config.walk.noise_std_m
    );
    eprintln!(
        "Compass: heading {:.1} deg, sample every {} ms, turn {:.1} deg/s",
        args.heading, sim_config.compass.sample_interval_ms, sim_config.compass.turn_rate_dps
    );
    eprintln!();

    let walk = SimulatedWalk::new(args.start.point(), destination.point, sim_config.walk);
    let compass = SimulatedCompass::new(args.heading, sim_config.compass);

    let mut session = GuidanceSession::new(sim_config.guidance.clone());
    session.start(destination);

    let (tx, rx) = bounded(32);
    let _walk_producer = walk.spawn(tx.clone());
    let _compass_producer = compass.spawn(tx);

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    let frame_interval = sim_config.guidance.output.frame_interval();
    let readout_interval = sim_config.guidance.output.readout_interval();
    let deadline = Instant::now() + Duration::from_secs(args.duration_secs);

    let mut last_frame = Instant::now();
    let mut last_readout = Instant::now() - readout_interval;

    while Instant::now() < deadline {
        match rx.recv_timeout(frame_interval) {
            Ok(GuidanceEvent::Fix(point)) => {
                session.on_fix(point);
            }
            Ok(GuidanceEvent::Magnetometer(sample)) => {
                session.on_magnetometer(sample);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("Sensor stream closed");
                break;
            }
        }

        let now = Instant::now();
        session.tick(now.duration_since(last_frame));
        last_frame = now;

        if now.duration_since(last_readout) >= readout_interval {
            println!("{}", formatter.format(&GuidanceReadout::capture(&session)));
            last_readout = now;
        }

        if session.phase() == GuidancePhase::Guiding
            && session.distance_to_destination_m().unwrap_or(f64::MAX) < 5.0
        {
            eprintln!("Arrived at destination");
            break;
        }
    }

    session.stop();
    // Producer handles drop here, stopping and joining both threads

    Ok(())
}
