use std::path::Path;

use crate::components::{
    AerodynamicState, Aerofoil, FlightCondition, MassArrangement, Plane, Polar,
};
use crate::utils::SolverError;

/// Everything the inviscid solver needs for one trimmed solve.
#[derive(Debug, Clone, Copy)]
pub struct InviscidJob<'a> {
    pub plane: &'a Plane,
    pub mass: &'a MassArrangement,
    pub flight: &'a FlightCondition,
    /// Exclusive scratch directory for this invocation.
    pub workdir: &'a Path,
}

/// Angle of attack sweep in degrees, inclusive of both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl AlphaRange {
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    /// The angles a sweep visits.
    pub fn angles(&self) -> Vec<f64> {
        if !(self.step > 0.0) || self.stop < self.start {
            return vec![self.start];
        }
        let count = ((self.stop - self.start) / self.step + 1e-9).floor() as usize;
        (0..=count)
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }
}

/// One polar request: an aerofoil at a Reynolds number over an alpha sweep.
#[derive(Debug, Clone, Copy)]
pub struct ViscousJob<'a> {
    pub aerofoil: &'a Aerofoil,
    pub reynolds_number: f64,
    pub alpha_range: AlphaRange,
    /// Exclusive scratch directory for this invocation.
    pub workdir: &'a Path,
}

/// A 3D lifting-surface solver that trims the whole plane in one call.
pub trait InviscidSolver {
    fn solve(&self, job: &InviscidJob<'_>) -> Result<AerodynamicState, SolverError>;
}

/// A 2D section solver producing polars.
///
/// Implementations must tolerate concurrent calls, each with its own
/// working directory.
pub trait ViscousSolver: Send + Sync {
    fn polar(&self, job: &ViscousJob<'_>) -> Result<Polar, SolverError>;
}
