//! headless: drives the contagion simulation without a renderer.
//!
//! Stands in for a frame loop: the simulation is ticked on a synthetic clock
//! at a fixed frame interval, the epidemic curve is logged as it unfolds,
//! and the history can be written out as JSON for plotting.
//!
//! ```text
//! cargo run -p headless -- --seconds 60 --detector rtree
//! cargo run -p headless -- --config scenario.json --history curve.json
//! RUST_LOG=ct_sim=trace cargo run -p headless
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ct_core::{ContagionConfig, Timestamp};
use ct_sim::{HistoryRecorder, Sim, SimBuilder, SimObserver, Snapshot};
use ct_spatial::{BruteForceDetector, ProximityDetector, RTreeDetector, Transmission};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DetectorKind {
    Brute,
    Rtree,
}

#[derive(Parser, Debug)]
#[command(name = "headless")]
#[command(about = "Run the contagion simulation on a synthetic clock", long_about = None)]
struct Args {
    /// JSON file with a `ContagionConfig`; missing fields take defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the configured infection radius
    #[arg(short, long)]
    radius: Option<f64>,

    /// Simulated seconds to run
    #[arg(long, default_value = "120")]
    seconds: u64,

    /// Synthetic frame interval in milliseconds
    #[arg(long, default_value = "16")]
    frame_ms: u64,

    /// Log a progress line every this many simulated seconds
    #[arg(long, default_value = "5")]
    report_every: u64,

    /// Proximity detector
    #[arg(short, long, value_enum, default_value = "brute")]
    detector: DetectorKind,

    /// Pin patient zero to the centre of the region
    #[arg(long)]
    center_patient_zero: bool,

    /// Write the infected-count history to this file as JSON
    #[arg(long)]
    history: Option<PathBuf>,

    /// Stop as soon as every agent is infected
    #[arg(long)]
    stop_when_saturated: bool,
}

// ── Progress observer ─────────────────────────────────────────────────────────

/// Logs a line every `interval_ms` of simulated time and tallies
/// transmissions while delegating the curve to a [`HistoryRecorder`].
struct ProgressLog {
    recorder:      HistoryRecorder,
    interval_ms:   u64,
    next_report:   Timestamp,
    transmissions: usize,
}

impl ProgressLog {
    fn new(interval_ms: u64) -> Self {
        Self {
            recorder:      HistoryRecorder::new(),
            interval_ms,
            next_report:   Timestamp(interval_ms),
            transmissions: 0,
        }
    }
}

impl SimObserver for ProgressLog {
    fn on_transmissions(&mut self, _now: Timestamp, applied: &[Transmission]) {
        self.transmissions += applied.len();
    }

    fn on_tick_end(&mut self, snapshot: &Snapshot) {
        self.recorder.on_tick_end(snapshot);
        if snapshot.at >= self.next_report {
            self.next_report = snapshot.at + self.interval_ms;
            info!(
                t = format_args!("{:.1}s", snapshot.latest.elapsed_seconds),
                infected = snapshot.stats.infected,
                rate = format_args!("{:.1}%", snapshot.stats.rate),
                edges = snapshot.connections.len(),
                "progress"
            );
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config(&args)?;
    info!(
        population = config.population_size,
        radius = config.infection_radius,
        seed = config.seed,
        bounds = ?config.bounds,
        detector = ?args.detector,
        "configuration"
    );

    match args.detector {
        DetectorKind::Brute => run(build(config, BruteForceDetector)?, &args),
        DetectorKind::Rtree => run(build(config, RTreeDetector)?, &args),
    }
}

fn load_config(args: &Args) -> Result<ContagionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<ContagionConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ContagionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(radius) = args.radius {
        config.infection_radius = radius;
    }
    if args.center_patient_zero {
        config.patient_zero_position = Some(config.bounds.center());
    }
    Ok(config)
}

fn build<D: ProximityDetector>(config: ContagionConfig, detector: D) -> Result<Sim<D>> {
    let sim = SimBuilder::new(config)
        .detector(detector)
        .autostart(true)
        .build(Timestamp::ZERO)
        .context("building simulation")?;
    Ok(sim)
}

fn run<D: ProximityDetector>(mut sim: Sim<D>, args: &Args) -> Result<()> {
    let frame_ms = args.frame_ms.max(1);
    let end = Timestamp(args.seconds.saturating_mul(1_000));
    let mut log = ProgressLog::new(args.report_every.max(1).saturating_mul(1_000));

    let mut now = Timestamp::ZERO;
    while now < end {
        now = now + frame_ms;
        let Some(snapshot) = sim.tick_with(now, &mut log) else {
            break;
        };
        if args.stop_when_saturated && snapshot.stats.infected == snapshot.stats.total {
            info!(t = format_args!("{:.1}s", snapshot.latest.elapsed_seconds), "population saturated");
            break;
        }
    }

    let stats = sim.stats();
    info!(
        ticks = log.recorder.len(),
        infected = stats.infected,
        total = stats.total,
        rate = format_args!("{:.1}%", stats.rate),
        transmissions = log.transmissions,
        "finished"
    );

    if let Some(path) = &args.history {
        let json = serde_json::to_string_pretty(sim.history())?;
        fs::write(path, json).with_context(|| format!("writing history {}", path.display()))?;
        info!(points = sim.history().len(), path = %path.display(), "history written");
    }
    Ok(())
}
