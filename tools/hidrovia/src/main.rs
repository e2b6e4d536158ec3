use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hidrovia_channel::{
    now_ms, Buoy, Channel, GeoPoint, JsonFileStore, NewReport, ReportIdentifier, ReportKind,
    ReportRegistry, Severity, SnapConfig, DEFAULT_SNAP_THRESHOLD_M,
};
use std::path::PathBuf;

mod dataset;
mod input;
mod output;

use input::{read_buoys, read_channel};
use output::{write_reports_geojson, write_snapped_geojson};

#[derive(Parser, Debug)]
#[command(
    name = "hidrovia",
    author,
    version,
    about = "Snap waterway buoys onto the channel and manage hazard reports",
    long_about = "Aligns surveyed buoy positions with the navigation channel centerline \
                  and keeps a local list of hazard reports (submerged logs, damaged buoys, \
                  anomalies) that navigators can confirm or resolve.\n\n\
                  Without input files the built-in Barra Bonita - Jaú reach of the Tietê \
                  waterway is used."
)]
struct Args {
    /// Verbose output (show debug messages)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Snap buoys onto the channel centerline
    Snap(SnapArgs),

    /// File, confirm and resolve hazard reports
    Reports(ReportsArgs),
}

#[derive(clap::Args, Debug)]
struct SnapArgs {
    /// Channel centerline GeoJSON (LineString); defaults to the built-in reach
    #[arg(short, long)]
    channel: Option<PathBuf>,

    /// Buoys JSON array; defaults to the built-in survey
    #[arg(short, long)]
    buoys: Option<PathBuf>,

    /// Buoys farther than this from the channel (meters) keep their position
    #[arg(short, long, default_value_t = DEFAULT_SNAP_THRESHOLD_M)]
    threshold: f64,

    /// Output GeoJSON with the channel and placed buoys
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct ReportsArgs {
    /// JSON file holding the reports (created with a sample report if missing)
    #[arg(short, long, default_value = "relatos.json")]
    store: PathBuf,

    #[command(subcommand)]
    action: ReportAction,
}

#[derive(Subcommand, Debug)]
enum ReportAction {
    /// List active reports
    List,

    /// File a new report
    Add {
        /// PERIGO, BOIA_DANIFICADA or ANOMALIA
        #[arg(short, long, value_parser = parse_kind)]
        kind: ReportKind,

        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// BAIXA, MEDIA or ALTA
        #[arg(long, value_parser = parse_severity, default_value = "MEDIA")]
        severity: Severity,
    },

    /// Confirm that a reported hazard is still there
    Confirm { id: String },

    /// Mark a report as resolved and remove it
    Resolve { id: String },

    /// List reports within a radius of a point
    Near {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Search radius in meters
        #[arg(short, long, default_value_t = 500.0)]
        radius: f64,
    },

    /// Write reports as GeoJSON points
    Export {
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn parse_kind(s: &str) -> std::result::Result<ReportKind, String> {
    ReportKind::from_code(&s.to_uppercase())
        .ok_or_else(|| format!("unknown report kind '{s}' (PERIGO, BOIA_DANIFICADA, ANOMALIA)"))
}

fn parse_severity(s: &str) -> std::result::Result<Severity, String> {
    Severity::from_code(&s.to_uppercase())
        .ok_or_else(|| format!("unknown severity '{s}' (BAIXA, MEDIA, ALTA)"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    match args.command {
        Command::Snap(snap) => run_snap(snap),
        Command::Reports(reports) => run_reports(reports),
    }
}

fn run_snap(args: SnapArgs) -> Result<()> {
    let config = SnapConfig::new(args.threshold).context("Invalid --threshold")?;

    let channel: Channel = match &args.channel {
        Some(path) => read_channel(path)?,
        None => dataset::channel()?,
    };
    let buoys: Vec<Buoy> = match &args.buoys {
        Some(path) => read_buoys(path)?,
        None => dataset::buoys(),
    };

    log::info!(
        "Channel '{}': {} segments, {:.0} m",
        channel.name(),
        channel.segment_count(),
        channel.length_m()
    );
    log::info!("Snapping {} buoys (threshold {} m)", buoys.len(), config.threshold_m);

    let snapped = channel
        .snap_buoys(&buoys, &config)
        .context("Failed to snap buoys")?;

    for placed in &snapped {
        match placed.snap_distance_m() {
            Some(distance) => log::info!(
                "  {:<10} {:<3} snapped {} m -> {}",
                placed.buoy.name,
                placed.buoy.kind.code(),
                distance,
                placed.position
            ),
            None => log::warn!(
                "  {:<10} {:<3} not snapped (too far), kept at {}",
                placed.buoy.name,
                placed.buoy.kind.code(),
                placed.position
            ),
        }
        if !placed.buoy.is_in_good_condition() {
            log::warn!("  {:<10} condition: {}", placed.buoy.name, placed.buoy.condition);
        }
    }

    let snapped_count = snapped.iter().filter(|b| b.is_snapped()).count();
    log::info!("{}/{} buoys snapped", snapped_count, snapped.len());

    if let Some(output) = &args.output {
        write_snapped_geojson(&channel, &snapped, output)?;
    }

    Ok(())
}

fn run_reports(args: ReportsArgs) -> Result<()> {
    let store = JsonFileStore::new(&args.store);
    let mut registry = ReportRegistry::load_or_seed(&store, now_ms())
        .with_context(|| format!("Failed to load reports from {}", args.store.display()))?;

    match args.action {
        ReportAction::List => {
            for report in registry.all() {
                println!(
                    "{}  {:<15} {:<5} {:<30} confirmations: {}  at {}",
                    report.id,
                    report.kind.code(),
                    report.severity.code(),
                    report.display_title(),
                    report.confirmations,
                    report.position
                );
            }
            log::info!("{} active reports", registry.len());
        }
        ReportAction::Add {
            kind,
            lat,
            lng,
            title,
            description,
            severity,
        } => {
            let position = GeoPoint::try_new(lat, lng).context("Invalid report position")?;
            let report = registry.add(
                NewReport {
                    kind,
                    title,
                    description,
                    severity,
                    position,
                },
                now_ms(),
            )?;
            println!("{}", report.id);
            registry.persist(&store).context("Failed to save reports")?;
            log::info!("Report saved");
        }
        ReportAction::Confirm { id } => {
            let report = registry.confirm(&ReportIdentifier::new(id), now_ms())?;
            log::info!("Confirmation recorded ({} total)", report.confirmations);
            registry.persist(&store).context("Failed to save reports")?;
        }
        ReportAction::Resolve { id } => {
            let report = registry.resolve(&ReportIdentifier::new(id))?;
            log::info!("Report '{}' resolved and removed", report.display_title());
            registry.persist(&store).context("Failed to save reports")?;
        }
        ReportAction::Near { lat, lng, radius } => {
            let point = GeoPoint::try_new(lat, lng).context("Invalid search position")?;
            let nearby = registry.reports_near(point, radius);
            for report in &nearby {
                println!(
                    "{}  {:<30} {:.0} m",
                    report.id,
                    report.display_title(),
                    hidrovia_channel::distance_meters(point, report.position)
                );
            }
            log::info!("{} reports within {} m", nearby.len(), radius);
        }
        ReportAction::Export { output } => {
            write_reports_geojson(registry.all(), &output)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!(parse_kind("perigo"), Ok(ReportKind::Hazard));
        assert_eq!(parse_severity("ALTA"), Ok(Severity::High));
        assert!(parse_kind("tronco").is_err());
    }

    #[test]
    fn test_add_accepts_negative_coordinates() {
        let args = Args::try_parse_from([
            "hidrovia", "reports", "--store", "r.json", "add", "--kind", "PERIGO",
            "--lat", "-22.5002", "--lng", "-48.5668", "--title", "Tronco",
        ])
        .unwrap();

        let Command::Reports(reports) = args.command else {
            panic!("expected reports command");
        };
        let ReportAction::Add { lat, lng, severity, .. } = reports.action else {
            panic!("expected add action");
        };
        assert_eq!((lat, lng), (-22.5002, -48.5668));
        assert_eq!(severity, Severity::Medium);
    }
}
