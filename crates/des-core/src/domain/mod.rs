pub mod errors;

pub use errors::{DesError, DesErrorCategory, DesResult};

use std::fmt::{Display, Formatter};

/// Isotope identifier in `Element-Mass` form, e.g. `Am-241`, `Co-60` or the
/// metastable `Tc-99m`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsotopeId(String);

impl IsotopeId {
    pub fn parse(raw: &str) -> DesResult<Self> {
        let normalized = raw.trim();
        let invalid = || {
            DesError::validation(
                "INPUT.ISOTOPE",
                format!("isotope '{raw}' must look like 'Am-241' (element symbol, '-', mass number)"),
            )
        };

        let (element, mass) = normalized.split_once('-').ok_or_else(invalid)?;
        let mass_digits = mass
            .strip_suffix('m')
            .or_else(|| mass.strip_suffix('M'))
            .unwrap_or(mass);

        let element_ok = (1..=3).contains(&element.len())
            && element.chars().all(|ch| ch.is_ascii_alphabetic());
        let mass_ok = (1..=3).contains(&mass_digits.len())
            && mass_digits.chars().all(|ch| ch.is_ascii_digit());

        if !element_ok || !mass_ok {
            return Err(invalid());
        }

        Ok(Self(normalized.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for IsotopeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Length,
    Thickness,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Width, Axis::Length, Axis::Thickness];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Length => "length",
            Self::Thickness => "thickness",
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Absorber half-dimensions in cm for a point source at the absorber centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub half_width: f64,
    pub half_length: f64,
    pub half_thickness: f64,
}

impl Geometry {
    /// Builds the geometry from full absorber dimensions in cm, halving each.
    pub fn from_dimensions(width: f64, length: f64, thickness: f64) -> DesResult<Self> {
        let width = require_positive("INPUT.ABSORBER_WIDTH", "absorber width", width)?;
        let length = require_positive("INPUT.ABSORBER_LENGTH", "absorber length", length)?;
        let thickness =
            require_positive("INPUT.ABSORBER_THICKNESS", "absorber thickness", thickness)?;

        Ok(Self {
            half_width: width / 2.0,
            half_length: length / 2.0,
            half_thickness: thickness / 2.0,
        })
    }

    pub fn half_dimension(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Width => self.half_width,
            Axis::Length => self.half_length,
            Axis::Thickness => self.half_thickness,
        }
    }

    pub fn half_dimensions(&self) -> [(Axis, f64); 3] {
        Axis::ALL.map(|axis| (axis, self.half_dimension(axis)))
    }
}

pub fn validate_activity(activity: f64) -> DesResult<f64> {
    require_positive("INPUT.ACTIVITY", "activity", activity)
}

fn require_positive(code: &'static str, field: &str, value: f64) -> DesResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DesError::validation(
            code,
            format!("{field} must be a finite value > 0, got {value}"),
        ))
    }
}
