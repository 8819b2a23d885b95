use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::geometry::{origin, ControlSurface, Section};
use crate::utils::AnalysisError;

/// Vortex-lattice panel counts and spacing for one surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshDefinition {
    pub chordwise: usize,
    pub chord_spacing: f64,
    pub spanwise: usize,
    pub span_spacing: f64,
}

impl Default for MeshDefinition {
    fn default() -> Self {
        Self {
            chordwise: 20,
            chord_spacing: 1.0,
            spanwise: 40,
            span_spacing: 1.0,
        }
    }
}

/// A lifting surface such as a wing, tailplane or fin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub name: String,
    pub sections: Vec<Section>,
    /// Mirrored about the symmetry plane, doubling area and drag.
    #[serde(default)]
    pub reflect: bool,
    #[serde(default)]
    pub mesh: MeshDefinition,
    /// Surface origin relative to the plane origin (m).
    #[serde(default = "origin")]
    pub translation: Vector3<f64>,
    /// Incidence added to every section (degrees).
    #[serde(default)]
    pub angle_bias: f64,
}

impl Surface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
            reflect: false,
            mesh: MeshDefinition::default(),
            translation: Vector3::zeros(),
            angle_bias: 0.0,
        }
    }

    pub fn with_sections(mut self, sections: impl IntoIterator<Item = Section>) -> Self {
        self.sections.extend(sections);
        self
    }

    pub fn reflected(mut self, reflect: bool) -> Self {
        self.reflect = reflect;
        self
    }

    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Attaches `control` to every section in `start..=end`.
    pub fn add_control_surface(
        &mut self,
        control: ControlSurface,
        start: usize,
        end: usize,
    ) -> Result<(), AnalysisError> {
        if start > end || end >= self.sections.len() {
            return Err(AnalysisError::Configuration(format!(
                "surface '{}': control surface '{}' spans sections {}..={} but only {} exist",
                self.name,
                control.name,
                start,
                end,
                self.sections.len()
            )));
        }
        for section in &mut self.sections[start..=end] {
            section.control_surface = Some(control.clone());
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn reflection_factor(&self) -> f64 {
        if self.reflect {
            2.0
        } else {
            1.0
        }
    }

    /// Planform area from trapezoids between adjacent sections (m²).
    pub fn area(&self) -> f64 {
        let mut total_area = 0.0;
        for pair in self.sections.windows(2) {
            let height = 0.5 * (pair[0].chord + pair[1].chord);
            let length = pair[1].y() - pair[0].y();
            total_area += height * length;
        }
        total_area * self.reflection_factor()
    }

    /// Largest section chord (m).
    pub fn chord(&self) -> f64 {
        self.sections
            .iter()
            .map(|section| section.chord)
            .fold(0.0, f64::max)
    }

    /// Tip-to-tip span, including the mirrored half (m).
    pub fn span(&self) -> f64 {
        let max_y = self
            .sections
            .iter()
            .map(Section::y)
            .fold(0.0, f64::max);
        max_y * self.reflection_factor()
    }

    /// Checks the invariants the drag integration relies on.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let fail = |msg: String| {
            Err(AnalysisError::Configuration(format!(
                "surface '{}': {}",
                self.name, msg
            )))
        };

        if self.sections.is_empty() {
            return fail("has no sections".to_string());
        }
        for (index, section) in self.sections.iter().enumerate() {
            if !(section.chord.is_finite() && section.chord > 0.0) {
                return fail(format!(
                    "section {} chord must be positive, got {}",
                    index, section.chord
                ));
            }
            if !section.y().is_finite() {
                return fail(format!("section {} spanwise position is not finite", index));
            }
        }
        if self.sections[0].y() != 0.0 {
            return fail(format!(
                "root section must sit at y = 0, got {}",
                self.sections[0].y()
            ));
        }
        for (index, pair) in self.sections.windows(2).enumerate() {
            if pair[1].y() < pair[0].y() {
                return fail(format!(
                    "section {} at y = {} lies inboard of section {} at y = {}",
                    index + 1,
                    pair[1].y(),
                    index,
                    pair[0].y()
                ));
            }
        }
        Ok(())
    }
}
