use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::geometry::{origin, Aerofoil, ControlSurface};

/// One spanwise station of a lifting surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Local chord length (m).
    pub chord: f64,
    /// Leading edge location relative to the surface origin (m); `y` is spanwise.
    #[serde(default = "origin")]
    pub leading_edge: Vector3<f64>,
    /// Incidence relative to the surface (degrees).
    #[serde(default)]
    pub twist: f64,
    pub aerofoil: Aerofoil,
    #[serde(default)]
    pub control_surface: Option<ControlSurface>,
}

impl Section {
    pub fn new(chord: f64, aerofoil: Aerofoil) -> Self {
        Self {
            chord,
            leading_edge: Vector3::zeros(),
            twist: 0.0,
            aerofoil,
            control_surface: None,
        }
    }

    pub fn with_leading_edge(mut self, x: f64, y: f64, z: f64) -> Self {
        self.leading_edge = Vector3::new(x, y, z);
        self
    }

    pub fn with_twist(mut self, twist: f64) -> Self {
        self.twist = twist;
        self
    }

    /// Spanwise coordinate of the section.
    pub fn y(&self) -> f64 {
        self.leading_edge.y
    }

    pub fn trailing_edge(&self) -> Vector3<f64> {
        self.leading_edge + Vector3::new(self.chord, 0.0, 0.0)
    }
}
