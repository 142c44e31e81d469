//! Decay-line tables and the sources that provide them.

mod nndc;

pub use nndc::{NNDC_DECAY_SEARCH_URL, decay_search_url, parse_decay_document};

use crate::domain::{DesError, DesResult, IsotopeId};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Anything that can produce the decay-line table for an isotope.
pub trait DecayDataSource {
    fn fetch(&self, isotope: &IsotopeId) -> DesResult<DecayTable>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecayDocumentError {
    #[error("decay document has {actual} tables, expected at least {expected}")]
    MissingTables { expected: usize, actual: usize },
    #[error("decay document Q-value table has no data row")]
    MissingQRow,
    #[error("decay document Q-value row has {actual} cells, expected at least 4")]
    MissingQCell { actual: usize },
    #[error("decay document Q-value '{value}' is not a number")]
    InvalidQValue { value: String },
    #[error("decay document gamma table has no numeric energy/intensity rows")]
    NoGammaLines,
    #[error("decay line at {energy} keV with intensity {intensity} is invalid")]
    InvalidLine { energy: f64, intensity: f64 },
    #[error("decay Q-value must be finite, got {value}")]
    NonFiniteQValue { value: f64 },
    #[error("invalid HTML selector '{selector}'")]
    InvalidSelector { selector: String },
}

impl From<DecayDocumentError> for DesError {
    fn from(error: DecayDocumentError) -> Self {
        DesError::data_unavailable("DATA.DECAY_DOCUMENT", error.to_string())
    }
}

/// A gamma line in keV with its intensity as a fraction per decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayLine {
    pub energy: f64,
    pub intensity: f64,
    pub escape_energy: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecayTable {
    q_value: f64,
    lines: Vec<DecayLine>,
}

impl DecayTable {
    /// Builds a table from `(energy keV, intensity fraction)` rows in source
    /// order. Rows repeated verbatim collapse into their first occurrence.
    pub fn new(
        q_value: f64,
        rows: impl IntoIterator<Item = (f64, f64)>,
    ) -> Result<Self, DecayDocumentError> {
        if !q_value.is_finite() {
            return Err(DecayDocumentError::NonFiniteQValue { value: q_value });
        }

        let mut lines: Vec<DecayLine> = Vec::new();
        for (energy, intensity) in rows {
            // Annihilation radiation of beta+ emitters is listed above 100%
            // per decay, so intensities are only bounded below.
            let valid =
                energy.is_finite() && energy > 0.0 && intensity.is_finite() && intensity >= 0.0;
            if !valid {
                return Err(DecayDocumentError::InvalidLine { energy, intensity });
            }
            if lines
                .iter()
                .any(|line| line.energy == energy && line.intensity == intensity)
            {
                continue;
            }
            lines.push(DecayLine {
                energy,
                intensity,
                escape_energy: q_value - energy,
            });
        }

        Ok(Self { q_value, lines })
    }

    pub fn q_value(&self) -> f64 {
        self.q_value
    }

    pub fn lines(&self) -> &[DecayLine] {
        &self.lines
    }

    pub fn max_energy(&self) -> Option<f64> {
        self.lines.iter().map(|line| line.energy).reduce(f64::max)
    }
}

impl DecayDataSource for DecayTable {
    fn fetch(&self, _isotope: &IsotopeId) -> DesResult<DecayTable> {
        Ok(self.clone())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DecayTableRecord {
    #[serde(default)]
    isotope: Option<String>,
    q_value: f64,
    lines: Vec<DecayLineRecord>,
}

#[derive(Debug, Deserialize)]
struct DecayLineRecord {
    energy: f64,
    intensity: f64,
}

/// Decay table stored locally as JSON:
/// `{ "isotope": "Am-241", "qValue": 5637.82, "lines": [{ "energy": 59.5409, "intensity": 0.359 }] }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecayTableFile {
    path: PathBuf,
}

impl DecayTableFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DecayDataSource for DecayTableFile {
    fn fetch(&self, isotope: &IsotopeId) -> DesResult<DecayTable> {
        let source = fs::read_to_string(&self.path).map_err(|source| {
            DesError::data_unavailable(
                "DATA.DECAY_FILE_READ",
                format!(
                    "failed to read decay table '{}': {}",
                    self.path.display(),
                    source
                ),
            )
        })?;
        let record: DecayTableRecord = serde_json::from_str(&source).map_err(|source| {
            DesError::data_unavailable(
                "DATA.DECAY_FILE_PARSE",
                format!(
                    "failed to parse decay table '{}': {}",
                    self.path.display(),
                    source
                ),
            )
        })?;

        if let Some(recorded) = record.isotope.as_deref() {
            if !recorded.trim().eq_ignore_ascii_case(isotope.as_str()) {
                warn!(
                    requested = %isotope,
                    recorded,
                    path = %self.path.display(),
                    "decay table file was recorded for a different isotope"
                );
            }
        }

        let rows = record
            .lines
            .into_iter()
            .map(|line| (line.energy, line.intensity));
        Ok(DecayTable::new(record.q_value, rows)?)
    }
}
