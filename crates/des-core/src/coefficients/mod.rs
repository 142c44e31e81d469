//! Mass attenuation reference data for the absorber material.
//!
//! The bundled table holds gold (Au) coefficients in cm^2/g with energies in
//! both MeV (`Energy`) and keV (`Energy.1`). Tables are immutable once loaded
//! and are passed by reference to everything that needs a coefficient.

mod resolver;

pub use resolver::{
    CoefficientLookupError, CoefficientMatch, MatchKind, resolve_coefficient, resolve_match,
};

use crate::domain::DesError;
use csv::StringRecord;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ENERGY_COLUMN: &str = "Energy.1";
pub const DEFAULT_COEFFICIENT_COLUMN: &str = "mu/rho";

const BUNDLED_GOLD_TABLE: &str = include_str!("../../data/au_attenuation.csv");

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientEntry {
    pub energy: f64,
    pub coefficient: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum CoefficientTableError {
    #[error("failed to read coefficient table '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("coefficient table is not valid CSV: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
    #[error("coefficient table has no header row")]
    MissingHeader,
    #[error("coefficient table has no column named '{column}'")]
    MissingColumn { column: String },
    #[error("coefficient table line {line} has {actual} fields, expected {expected}")]
    FieldCount {
        line: usize,
        expected: usize,
        actual: usize,
    },
    #[error("coefficient table line {line} column '{column}' is not a finite number: '{value}'")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },
    #[error("coefficient table has no data rows")]
    Empty,
    #[error("coefficient at {energy} keV must be >= 0, got {coefficient}")]
    NegativeCoefficient { energy: f64, coefficient: f64 },
    #[error(
        "coefficient table energies must be strictly increasing, row {index} has {current} after {previous}"
    )]
    NonIncreasingEnergy {
        index: usize,
        previous: f64,
        current: f64,
    },
}

impl From<CoefficientTableError> for DesError {
    fn from(error: CoefficientTableError) -> Self {
        DesError::data_unavailable("DATA.COEFFICIENT_TABLE", error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    entries: Vec<CoefficientEntry>,
}

impl CoefficientTable {
    pub fn from_entries(entries: Vec<CoefficientEntry>) -> Result<Self, CoefficientTableError> {
        if entries.is_empty() {
            return Err(CoefficientTableError::Empty);
        }

        for (index, entry) in entries.iter().enumerate() {
            if entry.coefficient < 0.0 {
                return Err(CoefficientTableError::NegativeCoefficient {
                    energy: entry.energy,
                    coefficient: entry.coefficient,
                });
            }
            if index > 0 && entry.energy <= entries[index - 1].energy {
                return Err(CoefficientTableError::NonIncreasingEnergy {
                    index,
                    previous: entries[index - 1].energy,
                    current: entry.energy,
                });
            }
        }

        Ok(Self { entries })
    }

    /// Parses a comma-separated table, taking energies from `energy_column` and
    /// coefficients from `coefficient_column`. Blank lines and `#` comments are
    /// skipped.
    pub fn from_csv(
        source: &str,
        energy_column: &str,
        coefficient_column: &str,
    ) -> Result<Self, CoefficientTableError> {
        let mut reader = csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source.as_bytes());

        let columns = reader.headers()?.clone();
        if columns.iter().all(str::is_empty) {
            return Err(CoefficientTableError::MissingHeader);
        }
        let energy_index = column_index(&columns, energy_column)?;
        let coefficient_index = column_index(&columns, coefficient_column)?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line_number = record
                .position()
                .map_or(0, |position| position.line() as usize);
            if record.len() != columns.len() {
                return Err(CoefficientTableError::FieldCount {
                    line: line_number,
                    expected: columns.len(),
                    actual: record.len(),
                });
            }

            entries.push(CoefficientEntry {
                energy: parse_field(&record[energy_index], line_number, energy_column)?,
                coefficient: parse_field(
                    &record[coefficient_index],
                    line_number,
                    coefficient_column,
                )?,
            });
        }

        Self::from_entries(entries)
    }

    pub fn bundled_gold(
        energy_column: &str,
        coefficient_column: &str,
    ) -> Result<Self, CoefficientTableError> {
        Self::from_csv(BUNDLED_GOLD_TABLE, energy_column, coefficient_column)
    }

    pub fn load(
        path: impl AsRef<Path>,
        energy_column: &str,
        coefficient_column: &str,
    ) -> Result<Self, CoefficientTableError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| CoefficientTableError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv(&source, energy_column, coefficient_column)
    }

    pub fn entries(&self) -> &[CoefficientEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn min_energy(&self) -> f64 {
        self.entries[0].energy
    }

    pub fn max_energy(&self) -> f64 {
        self.entries[self.entries.len() - 1].energy
    }

    pub fn resolve(&self, energy: f64) -> Result<f64, CoefficientLookupError> {
        resolve_coefficient(energy, &self.entries)
    }

    pub fn resolve_match(&self, energy: f64) -> Result<CoefficientMatch, CoefficientLookupError> {
        resolve_match(energy, &self.entries)
    }
}

fn column_index(columns: &StringRecord, name: &str) -> Result<usize, CoefficientTableError> {
    columns
        .iter()
        .position(|column| column == name)
        .ok_or_else(|| CoefficientTableError::MissingColumn {
            column: name.to_string(),
        })
}

fn parse_field(raw: &str, line: usize, column: &str) -> Result<f64, CoefficientTableError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CoefficientTableError::InvalidNumber {
            line,
            column: column.to_string(),
            value: raw.to_string(),
        })
}
