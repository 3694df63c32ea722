extern crate rc_zone;

use anyhow::Context;
use clap::Parser;
use rc_zone::output::FileOutput;
use rc_zone::run_project;
use std::ffi::OsStr;
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Default, Debug)]
#[clap(author, version, about, long_about = None)]
struct RcZoneArgs {
    #[arg(help = "Path to project input file in .json format")]
    input_file: String,
    #[arg(
        long,
        short,
        help = "Path to timestep file in .csv format with columns theta_e, phi_int, phi_sol"
    )]
    timesteps: String,
    #[arg(
        long,
        short,
        help = "Directory to write results to (defaults to <input file stem>__results)"
    )]
    output_dir: Option<PathBuf>,
    #[arg(long, short, default_value_t = false, help = "Log each timestep solve")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = RcZoneArgs::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose {
            Level::TRACE
        } else {
            Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting tracing subscriber failed")?;

    let input_file = Path::new(&args.input_file);
    let input_file_stem = input_file
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("project");

    let output_path = match args.output_dir {
        Some(dir) => dir,
        None => input_file.with_file_name(format!("{input_file_stem}__results")),
    };
    fs::create_dir_all(&output_path)
        .with_context(|| format!("could not create output directory {output_path:?}"))?;
    let file_output = FileOutput::new(output_path.clone(), format!("{input_file_stem}__{{}}.csv"));

    let input = File::open(input_file).with_context(|| format!("could not open {input_file:?}"))?;
    let timesteps = File::open(&args.timesteps)
        .with_context(|| format!("could not open timestep file {}", args.timesteps))?;

    let results = run_project(BufReader::new(input), BufReader::new(timesteps), &file_output)?;

    for (zone_name, zone_results) in &results {
        let summary = &zone_results.summary;
        info!(
            "{zone_name}: heating {:.2} kWh, cooling {:.2} kWh, {} unmet timesteps",
            summary.heating_energy_kwh, summary.cooling_energy_kwh, summary.unmet_timesteps
        );
    }
    info!("results written to {output_path:?}");

    Ok(())
}
