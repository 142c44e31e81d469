use des_core::coefficients::CoefficientTable;
use des_core::decay::NNDC_DECAY_SEARCH_URL;
use des_core::domain::DesResult;
use des_core::settings::{self, SimulationSettings};
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub(super) const NNDC_URL_ENV: &str = "DES_NNDC_URL";

/// Logs go to stderr; `RUST_LOG` wins over the `--verbose` fallback.
pub(super) fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub(super) fn load_settings(path: Option<&Path>) -> DesResult<SimulationSettings> {
    match path {
        Some(path) => Ok(settings::load_settings(path)?),
        None => Ok(SimulationSettings::default()),
    }
}

pub(super) fn load_coefficient_table(
    path: Option<&Path>,
    settings: &SimulationSettings,
) -> DesResult<CoefficientTable> {
    let table = match path {
        Some(path) => {
            CoefficientTable::load(path, &settings.energy_column, &settings.coefficient_column)?
        }
        None => CoefficientTable::bundled_gold(
            &settings.energy_column,
            &settings.coefficient_column,
        )?,
    };
    Ok(table)
}

pub(super) fn nndc_base_url() -> String {
    std::env::var(NNDC_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| NNDC_DECAY_SEARCH_URL.to_string())
}
