use crate::coefficients::CoefficientTable;
use crate::decay::DecayDataSource;
use crate::domain::{DesResult, Geometry, IsotopeId, validate_activity};
use crate::escape::EscapeSetBuilder;
use crate::report::SpectrumReport;
use crate::settings::SimulationSettings;
use tracing::{info, warn};

/// Validated inputs of one run: isotope, activity in Bq and absorber geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    pub isotope: IsotopeId,
    pub activity: f64,
    pub geometry: Geometry,
}

impl SimulationRequest {
    /// Validates the raw inputs; dimensions are full absorber sizes in cm.
    pub fn new(
        isotope: &str,
        activity: f64,
        width: f64,
        length: f64,
        thickness: f64,
    ) -> DesResult<Self> {
        Ok(Self {
            isotope: IsotopeId::parse(isotope)?,
            activity: validate_activity(activity)?,
            geometry: Geometry::from_dimensions(width, length, thickness)?,
        })
    }
}

pub fn run_simulation(
    request: &SimulationRequest,
    source: &dyn DecayDataSource,
    table: &CoefficientTable,
    settings: &SimulationSettings,
) -> DesResult<SpectrumReport> {
    let decay = source.fetch(&request.isotope)?;
    info!(
        isotope = %request.isotope,
        q_value = decay.q_value(),
        lines = decay.lines().len(),
        "decay table ready"
    );

    if let Some(max_energy) = decay.max_energy()
        && max_energy > decay.q_value()
    {
        warn!(
            isotope = %request.isotope,
            q_value = decay.q_value(),
            max_energy,
            "Q-value is below a line energy; escape energies will be negative"
        );
    }

    let escaped = EscapeSetBuilder::new(table)
        .with_engine(settings.engine())
        .with_intensity_cutoff(settings.intensity_cutoff)
        .build(&decay, &request.geometry, request.activity)?;
    info!(
        isotope = %request.isotope,
        escaped = escaped.len(),
        "escape set built"
    );

    Ok(SpectrumReport::new(&request.isotope, &escaped, decay.q_value()))
}
