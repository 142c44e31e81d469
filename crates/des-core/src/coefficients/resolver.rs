use super::CoefficientEntry;
use crate::domain::DesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Exact,
    LowerNeighbor,
    UpperNeighbor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientMatch {
    pub entry: CoefficientEntry,
    pub kind: MatchKind,
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoefficientLookupError {
    #[error("energy {energy} keV is below the coefficient table minimum {minimum} keV")]
    BelowRange { energy: f64, minimum: f64 },
    #[error("energy {energy} keV is above the coefficient table maximum {maximum} keV")]
    AboveRange { energy: f64, maximum: f64 },
    #[error("energy must be finite, got {energy}")]
    NonFiniteEnergy { energy: f64 },
    #[error("coefficient table has no entries")]
    EmptyTable,
}

impl From<CoefficientLookupError> for DesError {
    fn from(error: CoefficientLookupError) -> Self {
        DesError::lookup("LOOKUP.ENERGY_OUT_OF_RANGE", error.to_string())
    }
}

/// Looks up the coefficient for `energy` in `entries`, which must be sorted by
/// strictly increasing energy.
///
/// An exact energy match wins. Otherwise the two bracketing entries are
/// considered and the one with the smaller coefficient is chosen: the
/// reference table is keyed by its `mu/rho` column, and the smaller key is
/// preferred even when the other neighbor lies closer in energy.
pub fn resolve_match(
    energy: f64,
    entries: &[CoefficientEntry],
) -> Result<CoefficientMatch, CoefficientLookupError> {
    if !energy.is_finite() {
        return Err(CoefficientLookupError::NonFiniteEnergy { energy });
    }
    let (first, last) = match (entries.first(), entries.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(CoefficientLookupError::EmptyTable),
    };

    let upper_index = entries.partition_point(|entry| entry.energy < energy);
    if let Some(entry) = entries.get(upper_index) {
        if entry.energy == energy {
            return Ok(CoefficientMatch {
                entry: *entry,
                kind: MatchKind::Exact,
            });
        }
    }

    if upper_index == 0 {
        return Err(CoefficientLookupError::BelowRange {
            energy,
            minimum: first.energy,
        });
    }
    if upper_index == entries.len() {
        return Err(CoefficientLookupError::AboveRange {
            energy,
            maximum: last.energy,
        });
    }

    let lower = entries[upper_index - 1];
    let upper = entries[upper_index];
    let selected = if upper.coefficient < lower.coefficient {
        CoefficientMatch {
            entry: upper,
            kind: MatchKind::UpperNeighbor,
        }
    } else {
        CoefficientMatch {
            entry: lower,
            kind: MatchKind::LowerNeighbor,
        }
    };
    Ok(selected)
}

pub fn resolve_coefficient(
    energy: f64,
    entries: &[CoefficientEntry],
) -> Result<f64, CoefficientLookupError> {
    resolve_match(energy, entries).map(|found| found.entry.coefficient)
}

#[cfg(test)]
mod tests {
    use super::{CoefficientLookupError, MatchKind, resolve_coefficient, resolve_match};
    use crate::coefficients::CoefficientEntry;
    use crate::domain::DesError;

    fn entries(rows: &[(f64, f64)]) -> Vec<CoefficientEntry> {
        rows.iter()
            .map(|&(energy, coefficient)| CoefficientEntry {
                energy,
                coefficient,
            })
            .collect()
    }

    #[test]
    fn exact_energy_returns_its_coefficient() {
        let table = entries(&[(10.0, 118.1), (20.0, 88.85), (30.0, 30.7)]);
        assert_eq!(resolve_coefficient(20.0, &table), Ok(88.85));
        assert_eq!(resolve_coefficient(10.0, &table), Ok(118.1));
        assert_eq!(resolve_coefficient(30.0, &table), Ok(30.7));
        assert_eq!(
            resolve_match(30.0, &table).map(|found| found.kind),
            Ok(MatchKind::Exact)
        );
    }

    #[test]
    fn smaller_key_wins_over_nearer_energy() {
        // 101 keV sits next to the 100 keV row but the 200 keV row has the smaller key.
        let table = entries(&[(100.0, 5.0), (200.0, 1.0)]);
        let found = resolve_match(101.0, &table).expect("energy is inside the table");
        assert_eq!(found.entry.coefficient, 1.0);
        assert_eq!(found.entry.energy, 200.0);
        assert_eq!(found.kind, MatchKind::UpperNeighbor);
    }

    #[test]
    fn lower_neighbor_wins_when_its_key_is_smaller() {
        // Absorption edge: coefficient jumps up above 80 keV.
        let table = entries(&[(80.0, 2.226), (100.0, 5.158)]);
        let found = resolve_match(99.0, &table).expect("energy is inside the table");
        assert_eq!(found.entry.coefficient, 2.226);
        assert_eq!(found.kind, MatchKind::LowerNeighbor);
    }

    #[test]
    fn equal_neighbor_keys_resolve_to_lower_neighbor() {
        let table = entries(&[(1.0, 0.5), (2.0, 0.5)]);
        let found = resolve_match(1.5, &table).expect("energy is inside the table");
        assert_eq!(found.kind, MatchKind::LowerNeighbor);
    }

    #[test]
    fn out_of_range_energies_fail() {
        let table = entries(&[(10.0, 118.1), (20.0, 88.85)]);
        assert_eq!(
            resolve_coefficient(9.5, &table),
            Err(CoefficientLookupError::BelowRange {
                energy: 9.5,
                minimum: 10.0
            })
        );
        assert_eq!(
            resolve_coefficient(20.5, &table),
            Err(CoefficientLookupError::AboveRange {
                energy: 20.5,
                maximum: 20.0
            })
        );
        assert!(matches!(
            resolve_coefficient(f64::NAN, &table),
            Err(CoefficientLookupError::NonFiniteEnergy { .. })
        ));
        assert_eq!(
            resolve_coefficient(15.0, &[]),
            Err(CoefficientLookupError::EmptyTable)
        );
    }

    #[test]
    fn lookup_error_maps_to_lookup_category() {
        let error: DesError = CoefficientLookupError::AboveRange {
            energy: 25000.0,
            maximum: 20000.0,
        }
        .into();
        assert_eq!(error.exit_code(), 4);
        assert!(error.message().contains("25000"));
    }
}
