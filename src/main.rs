use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info, level_filters::LevelFilter, warn};

use drone_partials::{analyze, emit, export, telemetry, wav, AnalysisConfig};

const DEFAULT_OUTPUT_DIR: &str = "controlValues";
const TRAJECTORY_FILE: &str = "trajectories.json";

fn main() {
    telemetry::init(LevelFilter::INFO);

    if let Err(err) = run() {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .context("usage: drone-partials <input.wav> [output_dir] [config.json]")?;
    let output_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let config = match args.next() {
        Some(path) => AnalysisConfig::load(&path)
            .with_context(|| format!("failed to load config {path}"))?,
        None => AnalysisConfig::default(),
    };

    let (sample_rate, signal) = wav::read_mono(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    info!(
        "{}: {} samples at {} Hz",
        input.display(),
        signal.len(),
        sample_rate
    );

    let start = std::time::Instant::now();
    let output = analyze(&signal, sample_rate, &config).context("analysis failed")?;
    info!(
        "analysed {} hops in {:?}, control rate {} Hz",
        output.hops(),
        start.elapsed(),
        output.control_rate
    );

    // the trajectories are still worth keeping when the hop count is too low
    // for a usable control rate
    export::write_trajectories(output_dir.join(TRAJECTORY_FILE), &output)
        .context("failed to export trajectories")?;
    if output.control_rate < 1 {
        warn!(
            "{} hops over {} samples leave no usable control rate, lower time_hop",
            output.hops(),
            output.signal_len
        );
    }

    let signals = output.control_signals();
    emit::write_control_signals(&output_dir, output.control_rate, &signals).with_context(|| {
        format!(
            "failed to write control signals to {}",
            output_dir.display()
        )
    })?;

    Ok(())
}
