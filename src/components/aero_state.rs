use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Strip-wise loading across the span, one entry per vortex-lattice strip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanwiseDistribution {
    pub y: Vec<f64>,
    pub chord: Vec<f64>,
    pub area: Vec<f64>,
    pub cl: Vec<f64>,
    pub cd: Vec<f64>,
    /// Pitching moment about the strip quarter chord.
    pub cm_quarter_chord: Vec<f64>,
}

impl SpanwiseDistribution {
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// Trimmed state returned by the inviscid solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AerodynamicState {
    /// Trim angle of attack (degrees).
    pub alpha: f64,
    pub lift_coefficient: f64,
    pub induced_drag_coefficient: f64,
    /// Span efficiency factor, when reported.
    pub efficiency: Option<f64>,
    /// Trim deflection per control surface name (degrees).
    pub control_deflections: BTreeMap<String, f64>,
    /// Hinge moment coefficient per control surface name.
    pub hinge_moments: BTreeMap<String, f64>,
    pub distribution: SpanwiseDistribution,
}

impl AerodynamicState {
    pub fn new(alpha: f64, lift_coefficient: f64, induced_drag_coefficient: f64) -> Self {
        Self {
            alpha,
            lift_coefficient,
            induced_drag_coefficient,
            ..Default::default()
        }
    }

    pub fn with_deflection(mut self, name: impl Into<String>, deflection: f64) -> Self {
        self.control_deflections.insert(name.into(), deflection);
        self
    }

    pub fn deflection(&self, name: &str) -> Option<f64> {
        self.control_deflections.get(name).copied()
    }
}
