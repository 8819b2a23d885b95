use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A lumped mass with its own principal inertias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMass {
    /// Mass (kg).
    pub mass: f64,
    /// Centre of gravity in the plane frame (m).
    pub location: Vector3<f64>,
    /// Principal moments of inertia ixx, iyy, izz (kg·m²).
    pub inertia: Vector3<f64>,
}

impl PointMass {
    pub fn new(mass: f64, location: Vector3<f64>) -> Self {
        Self {
            mass,
            location,
            inertia: Vector3::zeros(),
        }
    }

    pub fn with_inertia(mut self, ixx: f64, iyy: f64, izz: f64) -> Self {
        self.inertia = Vector3::new(ixx, iyy, izz);
        self
    }

    /// One `mass x y z ixx iyy izz` line of a mass file.
    pub fn to_mass_line(&self) -> String {
        format!(
            "{}   {}   {}   {}    {}   {}   {}",
            self.mass,
            self.location.x,
            self.location.y,
            self.location.z,
            self.inertia.x,
            self.inertia.y,
            self.inertia.z
        )
    }
}

/// The mass layout of an aircraft, flattened to point masses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MassArrangement {
    pub name: String,
    pub masses: Vec<PointMass>,
}

impl MassArrangement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            masses: Vec::new(),
        }
    }

    pub fn with_mass(mut self, mass: PointMass) -> Self {
        self.masses.push(mass);
        self
    }

    pub fn push(&mut self, mass: PointMass) {
        self.masses.push(mass);
    }

    /// Absorbs every point mass of a sub-arrangement.
    pub fn merge(&mut self, other: MassArrangement) {
        self.masses.extend(other.masses);
    }

    pub fn total_mass(&self) -> f64 {
        self.masses.iter().map(|m| m.mass).sum()
    }

    /// Mass-weighted centroid, or `None` for an empty or massless arrangement.
    pub fn center_of_gravity(&self) -> Option<Vector3<f64>> {
        let total = self.total_mass();
        if total <= 0.0 {
            return None;
        }
        let moment = self
            .masses
            .iter()
            .fold(Vector3::zeros(), |acc, m| acc + m.location * m.mass);
        Some(moment / total)
    }

    /// Renders the mass file read by the inviscid solver.
    pub fn to_mass_file(&self, gravity: f64, density: f64) -> String {
        let mut content = format!(
            "# Plane Name: {}\nLunit = 1.0 m\nMunit = 1.0 kg\nTunit = 1.0 s\n\ng   = {}\nrho = {}\n",
            self.name, gravity, density
        );
        let lines: Vec<String> = self.masses.iter().map(PointMass::to_mass_line).collect();
        content.push_str(&lines.join("\n"));
        content
    }
}
