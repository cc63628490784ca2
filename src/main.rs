// src/main.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use vowel_sign::{DataExporter, GestureConfig, RecordedSource, VowelTracker};

/// Fingerspelling vowel recognizer
#[derive(Parser)]
#[command(name = "vowel-sign")]
#[command(about = "Recognize A/E/I/O/U hand-shapes from hand landmarks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay recorded landmark frames (JSON Lines) through the recognizer
    Replay {
        /// Recording to replay
        input: PathBuf,

        /// Write CSV and HTML report into this directory
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Export into the default output directory
        #[arg(long, conflicts_with = "export")]
        save: bool,

        /// Session name (defaults to a timestamp)
        #[arg(short, long)]
        session: Option<String>,

        /// Log confirmations without playing audio
        #[arg(long)]
        mute: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    let config = match cli.config {
        Some(ref path) => GestureConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GestureConfig::default(),
    };

    match cli.command {
        Commands::Replay { input, export, save, session, mute } => {
            let export_dir = export.or_else(|| save.then(default_output_dir));
            replay(config, input, export_dir, session, mute)
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn default_output_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|p| p.join("VowelSign")))
        .unwrap_or_else(|| PathBuf::from("./output"))
}

fn replay(
    mut config: GestureConfig,
    input: PathBuf,
    export_dir: Option<PathBuf>,
    session: Option<String>,
    mute: bool,
) -> Result<()> {
    if mute {
        config.audio.enabled = false;
    }

    let mut exporter = export_dir
        .map(|dir| DataExporter::new(dir, session))
        .transpose()
        .context("Invalid export session")?;
    let mut source = RecordedSource::open(&input)
        .with_context(|| format!("Failed to open recording {}", input.display()))?;
    let mut tracker = VowelTracker::new(config);

    info!("Replaying {}", input.display());
    let frames = tracker.process_source(&mut source, |result| {
        for hand in &result.hands {
            if let Some(vowel) = hand.confirmed {
                info!(frame = result.frame, hand = hand.index, %vowel, "confirmed");
            }
        }
        if let Some(exporter) = exporter.as_mut() {
            exporter.add_frame(result.clone());
        }
        Ok(())
    })?;

    let metrics = tracker.metrics();
    info!(
        frames,
        avg_ms = metrics.avg_processing_time * 1000.0,
        "Replay finished"
    );

    if let Some(exporter) = exporter {
        let summary = exporter.summary();
        let csv = exporter.export_csv().context("CSV export failed")?;
        let report = exporter.generate_report().context("Report generation failed")?;
        println!(
            "{} frames, {} hands, {:.1}% detected",
            summary.total_frames,
            summary.hand_observations,
            summary.detection_rate() * 100.0
        );
        for (vowel, count) in &summary.confirmations {
            println!("  {}: {}", vowel, count);
        }
        println!("CSV: {}", csv.display());
        println!("Report: {}", report.display());
    }

    Ok(())
}
