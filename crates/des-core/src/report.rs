use crate::domain::IsotopeId;
use crate::escape::EscapeResult;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Escape peaks and full-energy peak of one isotope, in keV.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumReport {
    pub isotope: String,
    pub escape_peaks: Vec<f64>,
    pub full_energy_peak: f64,
}

impl SpectrumReport {
    pub fn new(isotope: &IsotopeId, escaped: &[EscapeResult], q_value: f64) -> Self {
        Self {
            isotope: isotope.to_string(),
            escape_peaks: escaped.iter().map(|result| result.escape_energy).collect(),
            full_energy_peak: q_value,
        }
    }

    pub fn render_text(&self) -> String {
        format_spectrum(&self.isotope, &self.escape_peaks, self.full_energy_peak)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Display for SpectrumReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_text())
    }
}

pub fn format_spectrum(isotope: &str, escape_energies: &[f64], q_value: f64) -> String {
    let peaks = escape_energies
        .iter()
        .map(|&energy| format_energy(energy))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{isotope} will have escape peaks at: [{peaks}]\n{isotope} has a full energy peak at: {}",
        format_energy(q_value)
    )
}

/// Four decimals (0.1 eV) with trailing zeros trimmed, keeping one digit after
/// the point.
pub fn format_energy(value: f64) -> String {
    let mut text = format!("{value:.4}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.push('0');
        }
    }
    text
}
