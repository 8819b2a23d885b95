use serde::{Deserialize, Serialize};

/// How the mirrored half of a control surface deflects.
///
/// Elevators move together (symmetric), ailerons oppose each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeflectionType {
    Symmetric,
    Antisymmetric,
}

impl DeflectionType {
    pub fn sign(&self) -> i32 {
        match self {
            DeflectionType::Symmetric => 1,
            DeflectionType::Antisymmetric => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSurface {
    /// Name used to label the deflection in solver output.
    pub name: String,
    /// Hinge location as a fraction of the chord.
    pub hinge: f64,
    pub rotation_axis: [f64; 3],
    pub deflection_type: DeflectionType,
    /// Deflection per unit control input.
    pub gain: f64,
}

impl ControlSurface {
    pub fn new(
        name: impl Into<String>,
        hinge: f64,
        rotation_axis: [f64; 3],
        deflection_type: DeflectionType,
    ) -> Self {
        Self {
            name: name.into(),
            hinge,
            rotation_axis,
            deflection_type,
            gain: 1.0,
        }
    }

    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    /// The `CONTROL` line of a geometry file section block.
    pub fn to_geometry_line(&self) -> String {
        format!(
            "{}  {}  {}   {} {} {}   {}",
            self.name,
            self.gain,
            self.hinge,
            self.rotation_axis[0],
            self.rotation_axis[1],
            self.rotation_axis[2],
            self.deflection_type.sign()
        )
    }
}
