//! Pendulum Layout.
//!
//! Berechnet Segmentlängen und Pendelpositionen für eine Spannweite N aus
//! einer XLSX-Referenztabelle und gibt sie als Tabelle oder JSON aus.

use clap::{Parser, ValueEnum};
use pendulum_layout::{CalculationRequest, CalculatorOptions, LayoutError, calculate_from_workbook};
use std::path::PathBuf;
use std::process::ExitCode;

/// Pendel-Rechner: Segmente und Positionen entlang einer Spannweite
#[derive(Parser, Debug)]
#[command(name = "pendulum-layout", version)]
#[command(about = "Berechnet Pendelpositionen aus einer Referenztabelle", long_about = None)]
struct Args {
    /// Spannweite N
    #[arg(short = 'n', long = "n", allow_hyphen_values = true)]
    span: String,

    /// Parameter e
    #[arg(short, long, allow_hyphen_values = true)]
    e: String,

    /// Name des Tabellenblatts
    #[arg(short, long)]
    sheet: String,

    /// XLSX-Arbeitsmappe (überschreibt die Konfiguration)
    #[arg(short, long)]
    workbook: Option<PathBuf>,

    /// Pfad zur TOML-Konfiguration (Standard: neben der Binary)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ausgabeformat
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Summenkontrolle nach der Berechnung ausgeben
    #[arg(long)]
    verify: bool,

    /// Debug-Logging der Pipeline-Stufen
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match AppRunner::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let heading = e
                .downcast_ref::<LayoutError>()
                .map(LayoutError::heading)
                .unwrap_or("Error");
            eprintln!("{}: {:#}", heading, e);
            ExitCode::FAILURE
        }
    }
}

struct AppRunner;

impl AppRunner {
    fn run(args: &Args) -> anyhow::Result<()> {
        // Logger initialisieren
        let level = if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();

        log::info!("Pendulum Layout v{} startet...", env!("CARGO_PKG_VERSION"));

        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = args
            .config
            .clone()
            .unwrap_or_else(CalculatorOptions::config_path);
        let mut options = CalculatorOptions::load_from_file(&config_path);
        if let Some(workbook) = &args.workbook {
            options.workbook_path = workbook.display().to_string();
        }

        let request = CalculationRequest::parse(&args.span, &args.e, &args.sheet)?;
        let calculation = calculate_from_workbook(&request, &options)?;

        match args.format {
            OutputFormat::Table => {
                println!("Distances");
                for (i, d) in calculation.distances.iter().enumerate() {
                    println!("  Distance {:<3} {:>10.2}", i + 1, d);
                }
                println!("Positions");
                for (i, p) in calculation.positions.iter().enumerate() {
                    println!("  Position {:<3} {:>10.2}", i + 1, p);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&calculation)?);
            }
        }

        if args.verify {
            let total: f64 = calculation.displayed_distances().iter().sum();
            if calculation.verify(request.span, options.checksum_tolerance) {
                println!(
                    "Verification: the sum of distances is {}, which is approximately equal to N ({}).",
                    total, request.span
                );
            } else {
                println!(
                    "Verification: the sum of distances is {}, which is not equal to N ({}).",
                    total, request.span
                );
            }
        }

        Ok(())
    }
}
