//! Selection of the decay lines that leave the absorber.
//!
//! Every retained line gets a [`LineId`] (its position after the intensity
//! cut) that travels with it, so the surviving set is mapped back to lines
//! without searching by floating-point value.

use crate::attenuation::AttenuationEngine;
use crate::coefficients::{CoefficientLookupError, CoefficientTable};
use crate::decay::{DecayLine, DecayTable};
use crate::domain::{DesError, Geometry};
use ordered_float::OrderedFloat;
use std::collections::BTreeSet;
use tracing::debug;

/// Lines weaker than this fraction per decay are dropped before attenuation.
pub const DEFAULT_INTENSITY_CUTOFF: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(usize);

impl LineId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapeResult {
    pub line: LineId,
    pub energy: f64,
    pub escape_energy: f64,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EscapeSetError {
    #[error(transparent)]
    Lookup(#[from] CoefficientLookupError),
    #[error(
        "escape energy for the {energy} keV line is ambiguous: {count} retained lines share that energy"
    )]
    AmbiguousEnergy { energy: f64, count: usize },
}

impl From<EscapeSetError> for DesError {
    fn from(error: EscapeSetError) -> Self {
        match error {
            EscapeSetError::Lookup(lookup) => lookup.into(),
            EscapeSetError::AmbiguousEnergy { .. } => {
                DesError::ambiguity("AMBIGUITY.DUPLICATE_ENERGY", error.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EscapeSetBuilder<'a> {
    table: &'a CoefficientTable,
    engine: AttenuationEngine,
    intensity_cutoff: f64,
}

impl<'a> EscapeSetBuilder<'a> {
    pub fn new(table: &'a CoefficientTable) -> Self {
        Self {
            table,
            engine: AttenuationEngine::default(),
            intensity_cutoff: DEFAULT_INTENSITY_CUTOFF,
        }
    }

    pub fn with_engine(mut self, engine: AttenuationEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_intensity_cutoff(mut self, intensity_cutoff: f64) -> Self {
        self.intensity_cutoff = intensity_cutoff;
        self
    }

    pub fn retained_lines<'t>(&self, decay: &'t DecayTable) -> Vec<(LineId, &'t DecayLine)> {
        decay
            .lines()
            .iter()
            .filter(|line| line.intensity >= self.intensity_cutoff)
            .enumerate()
            .map(|(index, line)| (LineId(index), line))
            .collect()
    }

    /// Returns the escaping lines in the order of the retained line list.
    ///
    /// A coefficient escapes when the beam keeps more than the survival
    /// fraction along at least one half-dimension, each axis tested on its own.
    pub fn build(
        &self,
        decay: &DecayTable,
        geometry: &Geometry,
        activity: f64,
    ) -> Result<Vec<EscapeResult>, EscapeSetError> {
        let retained = self.retained_lines(decay);
        let coefficients = retained
            .iter()
            .map(|(id, line)| -> Result<f64, CoefficientLookupError> {
                let found = self.table.resolve_match(line.energy)?;
                debug!(
                    line = id.index(),
                    energy = line.energy,
                    coefficient = found.entry.coefficient,
                    table_energy = found.entry.energy,
                    kind = ?found.kind,
                    "resolved attenuation coefficient"
                );
                Ok(found.entry.coefficient)
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let mut escaping: BTreeSet<OrderedFloat<f64>> = BTreeSet::new();
        for &coefficient in &coefficients {
            if escaping.contains(&OrderedFloat(coefficient)) {
                continue;
            }
            let survives_any_axis = geometry.half_dimensions().iter().any(|&(axis, thickness)| {
                let survives = self
                    .engine
                    .survives_traversal(activity, coefficient, thickness);
                debug!(
                    coefficient,
                    axis = %axis,
                    thickness,
                    intensity = self.engine.transmitted_intensity(activity, coefficient, thickness),
                    survives,
                    "attenuation along half-dimension"
                );
                survives
            });
            if survives_any_axis {
                escaping.insert(OrderedFloat(coefficient));
            }
        }

        let mut results = Vec::new();
        for (&(id, line), &coefficient) in retained.iter().zip(&coefficients) {
            if !escaping.contains(&OrderedFloat(coefficient)) {
                continue;
            }
            let count = retained
                .iter()
                .filter(|(_, other)| other.energy == line.energy)
                .count();
            if count > 1 {
                return Err(EscapeSetError::AmbiguousEnergy {
                    energy: line.energy,
                    count,
                });
            }
            results.push(EscapeResult {
                line: id,
                energy: line.energy,
                escape_energy: line.escape_energy,
                coefficient,
            });
        }

        Ok(results)
    }
}

pub fn build_escape_set(
    decay: &DecayTable,
    geometry: &Geometry,
    activity: f64,
    table: &CoefficientTable,
) -> Result<Vec<EscapeResult>, EscapeSetError> {
    EscapeSetBuilder::new(table).build(decay, geometry, activity)
}
