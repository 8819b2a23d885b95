use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::integrator::SurfaceSamples;
use crate::components::{AerodynamicState, FlightCondition, MassArrangement, Plane};

/// Snapshot of what a study was run on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyInputs {
    pub plane: Plane,
    pub flight: FlightCondition,
    pub mass: MassArrangement,
}

/// Everything the coupled analysis produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyResults {
    pub inviscid: AerodynamicState,
    /// One entry per surface, in plane order.
    pub surfaces: Vec<SurfaceSamples>,
    /// Drag per unit dynamic pressure of each surface (m²).
    pub surface_drag_areas: Vec<f64>,
    pub viscous_drag_coefficient: f64,
    pub total_drag_coefficient: f64,
}

/// Immutable record of one completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AerodynamicStudy {
    id: Uuid,
    created_at: DateTime<Utc>,
    inputs: StudyInputs,
    results: StudyResults,
}

impl AerodynamicStudy {
    pub(crate) fn new(inputs: StudyInputs, results: StudyResults) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            inputs,
            results,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn inputs(&self) -> &StudyInputs {
        &self.inputs
    }

    pub fn results(&self) -> &StudyResults {
        &self.results
    }

    pub fn inviscid(&self) -> &AerodynamicState {
        &self.results.inviscid
    }

    pub fn trim_alpha(&self) -> f64 {
        self.results.inviscid.alpha
    }

    pub fn lift_coefficient(&self) -> f64 {
        self.results.inviscid.lift_coefficient
    }

    pub fn induced_drag_coefficient(&self) -> f64 {
        self.results.inviscid.induced_drag_coefficient
    }

    pub fn viscous_drag_coefficient(&self) -> f64 {
        self.results.viscous_drag_coefficient
    }

    pub fn total_drag_coefficient(&self) -> f64 {
        self.results.total_drag_coefficient
    }

    pub fn dynamic_pressure(&self) -> f64 {
        self.inputs.flight.dynamic_pressure()
    }

    /// Lift over total drag.
    pub fn lift_to_drag(&self) -> Option<f64> {
        let cd = self.total_drag_coefficient();
        (cd != 0.0).then(|| self.lift_coefficient() / cd)
    }

    pub fn surface(&self, name: &str) -> Option<&SurfaceSamples> {
        self.results.surfaces.iter().find(|s| s.surface == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
