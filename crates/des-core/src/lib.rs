//! Double-escape spectrum estimation for a gamma source inside an absorber.
//!
//! The pipeline resolves an attenuation coefficient for every retained decay
//! line, tests the transmitted intensity along each absorber half-dimension
//! and reports the escape energies of the surviving lines next to the
//! full-energy peak.

pub mod attenuation;
pub mod coefficients;
pub mod decay;
pub mod domain;
pub mod escape;
pub mod report;
pub mod settings;
pub mod simulation;

pub use simulation::{SimulationRequest, run_simulation};
