//! Narrow-beam attenuation through the absorber, `I = A * exp(-mu * t * rho)`.

/// Density of the absorber material (gold) in g/cm^3.
pub const GOLD_DENSITY_G_PER_CM3: f64 = 19.3;
/// Fraction of the source activity a line must keep to count as escaped.
pub const DEFAULT_SURVIVAL_FRACTION: f64 = 0.001;

pub fn transmitted_intensity(activity: f64, coefficient: f64, thickness: f64, density: f64) -> f64 {
    activity * (-coefficient * thickness * density).exp()
}

/// `true` when `intensity` exceeds 0.1% of `activity`. A non-positive activity
/// never survives.
pub fn survives(intensity: f64, activity: f64) -> bool {
    survives_fraction(intensity, activity, DEFAULT_SURVIVAL_FRACTION)
}

fn survives_fraction(intensity: f64, activity: f64, fraction: f64) -> bool {
    activity > 0.0 && intensity > activity * fraction
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttenuationEngine {
    density: f64,
    survival_fraction: f64,
}

impl Default for AttenuationEngine {
    fn default() -> Self {
        Self {
            density: GOLD_DENSITY_G_PER_CM3,
            survival_fraction: DEFAULT_SURVIVAL_FRACTION,
        }
    }
}

impl AttenuationEngine {
    pub fn new(density: f64, survival_fraction: f64) -> Self {
        Self {
            density,
            survival_fraction,
        }
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn transmitted_intensity(&self, activity: f64, coefficient: f64, thickness: f64) -> f64 {
        transmitted_intensity(activity, coefficient, thickness, self.density)
    }

    pub fn survives(&self, intensity: f64, activity: f64) -> bool {
        survives_fraction(intensity, activity, self.survival_fraction)
    }

    pub fn survives_traversal(&self, activity: f64, coefficient: f64, thickness: f64) -> bool {
        let intensity = self.transmitted_intensity(activity, coefficient, thickness);
        self.survives(intensity, activity)
    }
}
