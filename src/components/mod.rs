pub mod aero_state;
pub mod flight_condition;
pub mod geometry;
pub mod mass;
pub mod polar;

pub use aero_state::{AerodynamicState, SpanwiseDistribution};
pub use flight_condition::{CaseParameter, FlightCondition};
pub use geometry::{
    Aerofoil, ControlSurface, DeflectionType, MeshDefinition, Plane, Section, Surface,
};
pub use mass::{MassArrangement, PointMass};
pub use polar::{LookupPolicy, Polar, PolarField, PolarHeader, PolarPoint};
