use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::components::LookupPolicy;
use crate::solvers::AlphaRange;
use crate::utils::{
    AnalysisError, ALPHA_SWEEP_ABOVE, ALPHA_SWEEP_BELOW, ALPHA_SWEEP_STEP, REFERENCE_VISCOSITY,
};

/// Resolution of `AlphaSweep::grid_offset`, in parts per step.
const GRID_RESOLUTION: f64 = 1e6;

/// Angle window swept around the local angles of one viscous group (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaSweep {
    /// Margin below the lowest local angle.
    pub below: f64,
    /// Margin above the highest local angle.
    pub above: f64,
    pub step: f64,
}

impl Default for AlphaSweep {
    fn default() -> Self {
        Self {
            below: ALPHA_SWEEP_BELOW,
            above: ALPHA_SWEEP_ABOVE,
            step: ALPHA_SWEEP_STEP,
        }
    }
}

impl AlphaSweep {
    /// Sweep covering every angle in `angles`.
    pub fn around(&self, angles: &[f64]) -> AlphaRange {
        let lowest = angles.iter().copied().fold(f64::INFINITY, f64::min);
        let highest = angles.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        AlphaRange::new(lowest - self.below, highest + self.above, self.step)
    }

    /// Signed distance of `alpha` from the nearest multiple of the step, in
    /// millionths of a step.
    ///
    /// Angles with equal offsets are whole steps apart, so one sweep started
    /// at any of them tabulates all of them.
    pub fn grid_offset(&self, alpha: f64) -> i64 {
        let steps = alpha / self.step;
        ((steps - steps.round()) * GRID_RESOLUTION).round() as i64
    }
}

/// Knobs of the coupled analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Divisor of the section Reynolds number, kinematic-viscosity-like (m²/s).
    pub reference_viscosity: f64,
    pub alpha_sweep: AlphaSweep,
    pub lookup: LookupPolicy,
    /// Run distinct viscous groups on the rayon pool.
    pub parallel_viscous: bool,
    /// Parent of the per-run scratch directory; the system temp dir when unset.
    pub scratch_root: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            reference_viscosity: REFERENCE_VISCOSITY,
            alpha_sweep: AlphaSweep::default(),
            lookup: LookupPolicy::Nearest,
            parallel_viscous: false,
            scratch_root: None,
        }
    }
}

impl AnalysisConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AnalysisError> {
        let file_contents = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_yaml::from_str(&file_contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.reference_viscosity > 0.0) || !self.reference_viscosity.is_finite() {
            return Err(AnalysisError::Configuration(format!(
                "reference viscosity must be positive, got {}",
                self.reference_viscosity
            )));
        }
        let sweep = &self.alpha_sweep;
        if !(sweep.step > 0.0) || !(sweep.below >= 0.0) || !(sweep.above >= 0.0) {
            return Err(AnalysisError::Configuration(format!(
                "alpha sweep needs a positive step and non-negative margins, got {:?}",
                sweep
            )));
        }
        Ok(())
    }

    /// `density * velocity * chord / reference_viscosity`
    pub fn reynolds_number(&self, density: f64, velocity: f64, chord: f64) -> f64 {
        density * velocity * chord / self.reference_viscosity
    }
}
