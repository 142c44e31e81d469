mod commands;
mod helpers;
mod retrieval;

use clap::Parser;
use des_core::domain::DesError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let des_error = error.as_des_error();
            eprintln!("{}", des_error.diagnostic_line());
            if let Some(summary_line) = des_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            des_error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => commands::run_simulate_command(cli.simulate),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "des-spectrum",
    version,
    about = "Determine peaks in a DES spectrum given isotope, activity, and absorber dimensions"
)]
struct Cli {
    #[command(flatten)]
    simulate: commands::SimulateArgs,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(DesError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_des_error(&self) -> DesError {
        match self {
            Self::Usage(message) => {
                DesError::validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => DesError::internal("INTERNAL.CLI", format!("{error:#}")),
        }
    }
}
