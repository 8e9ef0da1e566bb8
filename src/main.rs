//! geofence-inout - inbound/outbound tally of tracker fixes against a zone
//!
//! Loads zones, vehicles and telemetry, classifies every fix of the target
//! vehicle (or of every registered vehicle) against the vehicle's zone and
//! prints a report to stdout.
//!
//! Module structure:
//! - `domain/` - Core types (GeoPoint, Zone, Sample, RunSummary)
//! - `services/` - Distance, classifier, fleet fan-out
//! - `io/` - JSONL sources, registries, reports
//! - `infra/` - Config, logging

use anyhow::Context;
use clap::Parser;
use geofence_inout::domain::types::EntityId;
use geofence_inout::infra::config::{CONFIG_ENV, DEFAULT_CONFIG_PATH};
use geofence_inout::infra::{init_logging, Config, ReportFormat};
use geofence_inout::io::{Directory, ReportWriter, TelemetryLog, VehicleRegistry, ZoneRegistry};
use geofence_inout::services::run_fleet;
use tracing::info;

/// Geofence in/out - classify tracker GPS fixes against a circular zone
#[derive(Parser, Debug)]
#[command(name = "geofence-inout", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, env = CONFIG_ENV, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Tracker IMEI to classify (overrides [run] imei; default: every vehicle)
    #[arg(short, long)]
    imei: Option<i64>,

    /// Report format (overrides [report] format)
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(args.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        "geofence_inout_starting"
    );

    let config = Config::load_from_path(&args.config)
        .with_imei(args.imei)
        .with_report_format(args.format);

    info!(
        config_file = %config.config_file(),
        zones_file = %config.zones_file(),
        vehicles_file = %config.vehicles_file(),
        telemetry_file = %config.telemetry_file(),
        imei = ?config.imei(),
        format = ?config.report_format(),
        per_sample = config.per_sample(),
        "config_loaded"
    );

    let directory = Directory::new(
        ZoneRegistry::load(config.zones_file())?,
        VehicleRegistry::load(config.vehicles_file())?,
    );
    let telemetry = TelemetryLog::load(config.telemetry_file())?;

    let entities: Vec<EntityId> = match config.imei() {
        Some(imei) => vec![EntityId(imei)],
        None => directory.vehicles.iter().map(|v| v.entity).collect(),
    };

    let batches = telemetry.batches_for(entities);
    let runs = run_fleet(&directory, &batches);

    let stdout = std::io::stdout();
    let mut writer =
        ReportWriter::new(stdout.lock(), config.report_format(), config.per_sample());

    let mut failed = 0usize;
    for (batch, run) in batches.iter().zip(&runs) {
        let outcome = match &run.outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                // A single requested vehicle that cannot be classified is fatal
                if config.imei().is_some() {
                    return Err(e.clone())
                        .with_context(|| format!("Failed to classify vehicle {}", run.entity));
                }
                failed += 1;
                continue;
            }
        };

        let (vehicle, zone) = directory.resolve(run.entity)?;
        writer
            .write_run(vehicle, zone, &batch.samples, outcome)
            .context("Failed to write report")?;
    }
    writer.flush().context("Failed to write report")?;

    info!(entities = runs.len(), failed = failed, "geofence_inout_complete");
    Ok(())
}
