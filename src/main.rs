use clap::Parser;
use millkit::report::{build_toolpaths, load_paths, render_report};
use millkit::{init_logging, MeasurementSystem, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "millkit")]
#[command(
    about = "Report start position, bounds and machine time of a milling job",
    long_about = None
)]
struct Cli {
    /// Job settings file (.toml or .json)
    job: PathBuf,
    /// Path geometry: JSON array of sub-paths, each an array of [x, y, z] points
    paths: PathBuf,
    /// Report lengths in inches
    #[arg(long)]
    imperial: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;
    info!("millkit {} (built {})", VERSION, BUILD_DATE);

    let paths = load_paths(&cli.paths)?;
    let list = build_toolpaths(&cli.job, paths)?;
    let system = if cli.imperial {
        MeasurementSystem::Imperial
    } else {
        MeasurementSystem::Metric
    };

    print!("{}", render_report(&list, system)?);
    Ok(())
}
