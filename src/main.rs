use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use spooltrack::{analyze_file, init_logging, FilamentProperties};

/// Analyze a G-code file and report estimated filament consumption.
#[derive(Parser, Debug)]
#[command(name = "spooltrack", version, about)]
struct Cli {
    /// Path to the G-code file to analyze
    file: PathBuf,

    /// Filament diameter in millimeters (e.g. 1.75)
    #[arg(long)]
    diameter: Option<f64>,

    /// Filament density in g/cm³ (e.g. 1.24 for PLA)
    #[arg(long)]
    density: Option<f64>,

    /// Precomputed linear density in g/m; overrides diameter/density
    #[arg(long)]
    grams_per_meter: Option<f64>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    let filament = FilamentProperties {
        diameter_mm: cli.diameter,
        density: cli.density,
        grams_per_meter: cli.grams_per_meter,
    };
    filament.validate().context("invalid filament properties")?;

    let analysis = analyze_file(&cli.file, &filament)
        .with_context(|| format!("failed to analyze {}", cli.file.display()))?;

    let json = if cli.compact {
        serde_json::to_string(&analysis)?
    } else {
        serde_json::to_string_pretty(&analysis)?
    };
    println!("{}", json);

    Ok(())
}
