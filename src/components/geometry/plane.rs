use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::geometry::{origin, Surface};
use crate::utils::AnalysisError;

/// A complete aircraft configuration made of lifting surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub name: String,
    pub surfaces: Vec<Surface>,
    /// Index of the surface supplying reference area, chord and span.
    #[serde(default)]
    pub reference_surface: usize,
    /// Moment reference location (m).
    #[serde(default = "origin")]
    pub moment_reference: Vector3<f64>,
}

impl Plane {
    pub fn new(name: impl Into<String>, surfaces: Vec<Surface>) -> Self {
        Self {
            name: name.into(),
            surfaces,
            reference_surface: 0,
            moment_reference: Vector3::zeros(),
        }
    }

    /// Loads a plane definition from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AnalysisError> {
        let file_contents = std::fs::read_to_string(path)?;
        let plane: Plane = serde_yaml::from_str(&file_contents)?;
        Ok(plane)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Surface> {
        self.surfaces.iter()
    }

    pub fn reference(&self) -> Option<&Surface> {
        self.surfaces.get(self.reference_surface)
    }

    pub fn reference_area(&self) -> f64 {
        self.reference().map_or(0.0, Surface::area)
    }

    pub fn reference_chord(&self) -> f64 {
        self.reference().map_or(0.0, Surface::chord)
    }

    pub fn reference_span(&self) -> f64 {
        self.reference().map_or(0.0, Surface::span)
    }

    pub fn section_count(&self) -> usize {
        self.surfaces.iter().map(Surface::len).sum()
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.surfaces.is_empty() {
            return Err(AnalysisError::Configuration(format!(
                "plane '{}' has no surfaces",
                self.name
            )));
        }
        for surface in &self.surfaces {
            surface.validate()?;
        }
        let area = self.reference_area();
        if self.reference().is_none() || !(area > 0.0) {
            return Err(AnalysisError::Configuration(format!(
                "plane '{}': reference surface {} has no planform area",
                self.name, self.reference_surface
            )));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Plane {
    type Item = &'a Surface;
    type IntoIter = std::slice::Iter<'a, Surface>;

    fn into_iter(self) -> Self::IntoIter {
        self.surfaces.iter()
    }
}
