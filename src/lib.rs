//! Aerodynamic performance estimation for multi-surface aircraft.
//!
//! An inviscid lifting-surface solver trims the whole plane; a 2D viscous
//! solver then supplies section drag at each section's local angle, and the
//! section drag is integrated along the span into a viscous drag coefficient.

pub mod analysis;
pub mod components;
pub mod solvers;
pub mod utils;

pub use analysis::{AerodynamicAnalysis, AerodynamicStudy, AnalysisConfig};
pub use components::{
    AerodynamicState, Aerofoil, FlightCondition, LookupPolicy, MassArrangement, Plane, Polar,
    PolarPoint, Section, Surface,
};
pub use solvers::{AvlRunner, InviscidSolver, SolverSettings, ViscousSolver, XfoilRunner};
pub use utils::{AnalysisError, SolverError};
