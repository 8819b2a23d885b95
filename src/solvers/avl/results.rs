use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::components::{AerodynamicState, SpanwiseDistribution};
use crate::utils::{SolverError, SolverKind};

/// Decimal number without exponent, as printed in the labeled result blocks.
const NUMBER: &str = r"-?\d*\.\d*";

// Strip-force table columns
const STRIP_Y: usize = 0;
const STRIP_CHORD: usize = 1;
const STRIP_AREA: usize = 2;
const STRIP_CL: usize = 6;
const STRIP_CD: usize = 7;
const STRIP_CM_QUARTER_CHORD: usize = 9;

/// One result file: where it came from and what it says.
#[derive(Debug, Clone)]
pub struct ResultText {
    pub path: PathBuf,
    pub content: String,
}

impl ResultText {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    fn parse_error(&self, field: &str, reason: impl Into<String>) -> SolverError {
        SolverError::parse(SolverKind::Inviscid, &self.path, field, reason)
    }
}

/// The labeled-field result files of one inviscid run.
#[derive(Debug, Clone)]
pub struct AvlResults {
    pub total_forces: ResultText,
    pub strip_forces: ResultText,
    pub hinge_moments: ResultText,
}

impl AvlResults {
    pub fn new(total_forces: ResultText, strip_forces: ResultText, hinge_moments: ResultText) -> Self {
        Self {
            total_forces,
            strip_forces,
            hinge_moments,
        }
    }

    /// Finds `label = value` in the total-forces block.
    pub fn extract_field(&self, label: &str) -> Result<f64, SolverError> {
        let text = &self.total_forces;
        let pattern = format!(r"\b{}\s*=\s*({})", regex::escape(label), NUMBER);
        let regex = Regex::new(&pattern).map_err(|e| text.parse_error(label, e.to_string()))?;
        let captured = regex
            .captures(&text.content)
            .and_then(|captures| captures.get(1))
            .ok_or_else(|| text.parse_error(label, "label not found"))?;
        captured
            .as_str()
            .parse::<f64>()
            .map_err(|e| text.parse_error(label, format!("'{}': {}", captured.as_str(), e)))
    }

    pub fn alpha(&self) -> Result<f64, SolverError> {
        self.extract_field("Alpha")
    }

    pub fn cl(&self) -> Result<f64, SolverError> {
        self.extract_field("CLtot")
    }

    pub fn cd_induced(&self) -> Result<f64, SolverError> {
        self.extract_field("CDind")
    }

    pub fn efficiency(&self) -> Result<f64, SolverError> {
        self.extract_field("e")
    }

    pub fn reference_area(&self) -> Result<f64, SolverError> {
        self.extract_field("Sref")
    }

    pub fn reference_chord(&self) -> Result<f64, SolverError> {
        self.extract_field("Cref")
    }

    pub fn reference_span(&self) -> Result<f64, SolverError> {
        self.extract_field("Bref")
    }

    /// Trim deflection of a named control surface.
    pub fn deflection(&self, control: &str) -> Result<f64, SolverError> {
        self.extract_field(control)
    }

    /// One numeric column of every row of the strip-force table.
    pub fn distribution(&self, column: usize) -> Result<Vec<f64>, SolverError> {
        let text = &self.strip_forces;
        let field = format!("strip column {}", column);
        let pattern = format!(
            r"^\s*\d*{}\s*({})",
            format!(r"\s*{}", NUMBER).repeat(column),
            NUMBER
        );
        let regex = Regex::new(&pattern).map_err(|e| text.parse_error(&field, e.to_string()))?;

        let mut values = Vec::new();
        for line in text.content.lines() {
            if let Some(value) = regex.captures(line).and_then(|c| c.get(1)) {
                let parsed = value
                    .as_str()
                    .parse::<f64>()
                    .map_err(|e| text.parse_error(&field, format!("'{}': {}", value.as_str(), e)))?;
                values.push(parsed);
            }
        }
        Ok(values)
    }

    pub fn spanwise_distribution(&self) -> Result<SpanwiseDistribution, SolverError> {
        Ok(SpanwiseDistribution {
            y: self.distribution(STRIP_Y)?,
            chord: self.distribution(STRIP_CHORD)?,
            area: self.distribution(STRIP_AREA)?,
            cl: self.distribution(STRIP_CL)?,
            cd: self.distribution(STRIP_CD)?,
            cm_quarter_chord: self.distribution(STRIP_CM_QUARTER_CHORD)?,
        })
    }

    /// Hinge moment coefficient of a named control surface, if listed.
    pub fn hinge_moment(&self, control: &str) -> Result<Option<f64>, SolverError> {
        let text = &self.hinge_moments;
        let pattern = format!(r"(?m)^\s*{}\s+(\S+)", regex::escape(control));
        let regex = Regex::new(&pattern).map_err(|e| text.parse_error(control, e.to_string()))?;
        match regex.captures(&text.content).and_then(|c| c.get(1)) {
            Some(value) => value
                .as_str()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| text.parse_error(control, format!("'{}': {}", value.as_str(), e))),
            None => Ok(None),
        }
    }

    /// Assembles the trimmed state, reading one deflection per control surface.
    pub fn to_state(&self, controls: &[String]) -> Result<AerodynamicState, SolverError> {
        let mut control_deflections = BTreeMap::new();
        let mut hinge_moments = BTreeMap::new();
        for control in controls {
            control_deflections.insert(control.clone(), self.deflection(control)?);
            if let Some(moment) = self.hinge_moment(control)? {
                hinge_moments.insert(control.clone(), moment);
            }
        }

        Ok(AerodynamicState {
            alpha: self.alpha()?,
            lift_coefficient: self.cl()?,
            induced_drag_coefficient: self.cd_induced()?,
            efficiency: self.efficiency().ok(),
            control_deflections,
            hinge_moments,
            distribution: self.spanwise_distribution()?,
        })
    }
}
