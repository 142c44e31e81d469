use super::CliError;
use super::helpers::{init_tracing, load_coefficient_table, load_settings, nndc_base_url};
use super::retrieval::NndcClient;
use anyhow::Context;
use des_core::decay::DecayTableFile;
use des_core::{SimulationRequest, run_simulation};
use std::path::PathBuf;
use tracing::debug;

#[derive(clap::Args)]
pub(super) struct SimulateArgs {
    /// Isotope in the DES spectrum, e.g. Am-241
    #[arg(short = 'i', long)]
    isotope: String,

    /// Activity of the sample in Bq
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    activity: f64,

    /// Absorber width in cm
    #[arg(short = 'x', long, allow_negative_numbers = true)]
    width: f64,

    /// Absorber length in cm
    #[arg(short = 'y', long, allow_negative_numbers = true)]
    length: f64,

    /// Absorber thickness in cm
    #[arg(short = 'z', long, allow_negative_numbers = true)]
    thickness: f64,

    /// Local JSON decay table used instead of fetching from NNDC
    #[arg(long, value_name = "PATH")]
    decay_file: Option<PathBuf>,

    /// CSV attenuation table replacing the bundled gold data
    #[arg(long, value_name = "PATH")]
    coefficients: Option<PathBuf>,

    /// JSON settings file (density, survival fraction, intensity cut, column names)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log every coefficient lookup and axis decision to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

pub(super) fn run_simulate_command(args: SimulateArgs) -> Result<i32, CliError> {
    init_tracing(args.verbose);

    let request = SimulationRequest::new(
        &args.isotope,
        args.activity,
        args.width,
        args.length,
        args.thickness,
    )
    .map_err(CliError::Compute)?;
    let settings = load_settings(args.settings.as_deref()).map_err(CliError::Compute)?;
    let table = load_coefficient_table(args.coefficients.as_deref(), &settings)
        .map_err(CliError::Compute)?;
    debug!(
        entries = table.len(),
        min_energy = table.min_energy(),
        max_energy = table.max_energy(),
        "coefficient table loaded"
    );

    let report = match &args.decay_file {
        Some(path) => run_simulation(&request, &DecayTableFile::new(path), &table, &settings),
        None => {
            let client = NndcClient::new(nndc_base_url())?;
            run_simulation(&request, &client, &table, &settings)
        }
    }
    .map_err(CliError::Compute)?;

    if args.json {
        let rendered = report
            .to_json()
            .context("failed to serialize spectrum report")?;
        println!("{}", rendered);
    } else {
        println!("{}", report.render_text());
    }
    Ok(0)
}
