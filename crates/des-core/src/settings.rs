use crate::attenuation::{AttenuationEngine, DEFAULT_SURVIVAL_FRACTION, GOLD_DENSITY_G_PER_CM3};
use crate::coefficients::{DEFAULT_COEFFICIENT_COLUMN, DEFAULT_ENERGY_COLUMN};
use crate::domain::DesError;
use crate::escape::DEFAULT_INTENSITY_CUTOFF;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tunable constants of a run. Every key is optional in the JSON form and
/// falls back to the gold-absorber defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SimulationSettings {
    pub absorber_density: f64,
    pub survival_fraction: f64,
    pub intensity_cutoff: f64,
    pub energy_column: String,
    pub coefficient_column: String,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            absorber_density: GOLD_DENSITY_G_PER_CM3,
            survival_fraction: DEFAULT_SURVIVAL_FRACTION,
            intensity_cutoff: DEFAULT_INTENSITY_CUTOFF,
            energy_column: DEFAULT_ENERGY_COLUMN.to_string(),
            coefficient_column: DEFAULT_COEFFICIENT_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("setting '{field}' {requirement}, got {value}")]
    Invalid {
        field: &'static str,
        requirement: &'static str,
        value: String,
    },
}

impl From<SettingsError> for DesError {
    fn from(error: SettingsError) -> Self {
        DesError::validation("INPUT.SETTINGS", error.to_string())
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.absorber_density.is_finite() && self.absorber_density > 0.0) {
            return Err(invalid(
                "absorberDensity",
                "must be finite and > 0",
                self.absorber_density,
            ));
        }
        if !(self.survival_fraction > 0.0 && self.survival_fraction < 1.0) {
            return Err(invalid(
                "survivalFraction",
                "must lie in (0, 1)",
                self.survival_fraction,
            ));
        }
        if !(0.0..=1.0).contains(&self.intensity_cutoff) {
            return Err(invalid(
                "intensityCutoff",
                "must lie in [0, 1]",
                self.intensity_cutoff,
            ));
        }
        if self.energy_column.trim().is_empty() {
            return Err(invalid("energyColumn", "must not be empty", "\"\""));
        }
        if self.coefficient_column.trim().is_empty() {
            return Err(invalid("coefficientColumn", "must not be empty", "\"\""));
        }
        Ok(())
    }

    pub fn engine(&self) -> AttenuationEngine {
        AttenuationEngine::new(self.absorber_density, self.survival_fraction)
    }
}

fn invalid(
    field: &'static str,
    requirement: &'static str,
    value: impl ToString,
) -> SettingsError {
    SettingsError::Invalid {
        field,
        requirement,
        value: value.to_string(),
    }
}

pub fn load_settings(path: impl AsRef<Path>) -> Result<SimulationSettings, SettingsError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: SimulationSettings =
        serde_json::from_str(&source).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    settings.validate()?;
    Ok(settings)
}
