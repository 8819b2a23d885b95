pub mod config;
pub mod integrator;
mod orchestrator;
mod study;

pub use config::{AlphaSweep, AnalysisConfig};
pub use integrator::{surface_drag_area, SectionSample, SurfaceSamples};
pub use orchestrator::AerodynamicAnalysis;
pub use study::{AerodynamicStudy, StudyInputs, StudyResults};
