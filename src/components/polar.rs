use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::utils::AnalysisError;

/// One row of a viscous polar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarPoint {
    /// Angle of attack (degrees).
    pub alpha: f64,
    pub cl: f64,
    pub cd: f64,
    pub cm: f64,
}

impl PolarPoint {
    pub fn new(alpha: f64, cl: f64, cd: f64, cm: f64) -> Self {
        Self { alpha, cl, cd, cm }
    }

    pub fn get(&self, field: PolarField) -> f64 {
        match field {
            PolarField::Alpha => self.alpha,
            PolarField::Cl => self.cl,
            PolarField::Cd => self.cd,
            PolarField::Cm => self.cm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolarField {
    Alpha,
    Cl,
    Cd,
    Cm,
}

impl fmt::Display for PolarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolarField::Alpha => "alpha",
            PolarField::Cl => "cl",
            PolarField::Cd => "cd",
            PolarField::Cm => "cm",
        };
        f.write_str(name)
    }
}

impl FromStr for PolarField {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alpha" => Ok(PolarField::Alpha),
            "cl" => Ok(PolarField::Cl),
            "cd" => Ok(PolarField::Cd),
            "cm" => Ok(PolarField::Cm),
            _ => Err(AnalysisError::InvalidParameter(format!(
                "'{}' is not a polar column",
                s
            ))),
        }
    }
}

/// Run parameters echoed in the header of a polar file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarHeader {
    pub version: Option<f64>,
    pub aerofoil: String,
    pub xtr_top: Option<f64>,
    pub xtr_bottom: Option<f64>,
    pub mach: Option<f64>,
    pub reynolds_number: Option<f64>,
    pub ncrit: Option<f64>,
}

/// Coefficients of one aerofoil at one Reynolds number over an alpha sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polar {
    pub reynolds_number: f64,
    #[serde(default)]
    pub header: Option<PolarHeader>,
    points: Vec<PolarPoint>,
}

impl Polar {
    pub fn new(reynolds_number: f64, points: Vec<PolarPoint>) -> Self {
        Self {
            reynolds_number,
            header: None,
            points,
        }
    }

    pub fn with_header(mut self, header: PolarHeader) -> Self {
        self.header = Some(header);
        self
    }

    pub fn points(&self) -> &[PolarPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self, field: PolarField) -> Vec<f64> {
        self.points.iter().map(|p| p.get(field)).collect()
    }

    /// The tabulated point whose `field` is closest to `target`.
    ///
    /// No interpolation; ties go to the earlier row.
    pub fn nearest(&self, field: PolarField, target: f64) -> Option<&PolarPoint> {
        let mut best: Option<(&PolarPoint, f64)> = None;
        for point in &self.points {
            let distance = (point.get(field) - target).abs();
            match best {
                Some((_, best_distance)) if !(distance < best_distance) => {}
                _ if distance.is_nan() => {}
                _ => best = Some((point, distance)),
            }
        }
        best.map(|(point, _)| point)
    }

    pub fn min(&self, field: PolarField) -> Option<&PolarPoint> {
        self.extreme(field, Ordering::Less)
    }

    pub fn max(&self, field: PolarField) -> Option<&PolarPoint> {
        self.extreme(field, Ordering::Greater)
    }

    fn extreme(&self, field: PolarField, wanted: Ordering) -> Option<&PolarPoint> {
        self.points.iter().fold(None, |best, point| match best {
            Some(current)
                if point.get(field).partial_cmp(&current.get(field)) != Some(wanted) =>
            {
                Some(current)
            }
            _ => Some(point),
        })
    }

    fn sorted_by(&self, field: PolarField) -> Vec<PolarPoint> {
        let mut sorted = self.points.clone();
        sorted.sort_by(|a, b| a.get(field).total_cmp(&b.get(field)));
        sorted
    }

    /// dCl/dalpha between the two lowest angles of attack (per degree).
    pub fn lift_slope(&self) -> Option<f64> {
        let sorted = self.sorted_by(PolarField::Alpha);
        match sorted.as_slice() {
            [first, second, ..] if second.alpha != first.alpha => {
                Some((second.cl - first.cl) / (second.alpha - first.alpha))
            }
            _ => None,
        }
    }

    /// Drag coefficient at the point closest to zero lift.
    pub fn cd0(&self) -> Option<f64> {
        self.nearest(PolarField::Cl, 0.0).map(|p| p.cd)
    }

    /// Linear interpolation of every column against `field`, clamped to the table.
    pub fn interpolate(&self, field: PolarField, target: f64) -> Option<PolarPoint> {
        let sorted = self.sorted_by(field);
        let first = *sorted.first()?;
        let last = *sorted.last()?;
        if target <= first.get(field) {
            return Some(first);
        }
        if target >= last.get(field) {
            return Some(last);
        }
        let (lower, upper) = sorted
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .find(|(lower, upper)| lower.get(field) <= target && target <= upper.get(field))?;
        let width = upper.get(field) - lower.get(field);
        if width == 0.0 {
            return Some(lower);
        }
        let t = (target - lower.get(field)) / width;
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Some(PolarPoint {
            alpha: lerp(lower.alpha, upper.alpha),
            cl: lerp(lower.cl, upper.cl),
            cd: lerp(lower.cd, upper.cd),
            cm: lerp(lower.cm, upper.cm),
        })
    }
}

/// How a section's operating angle is matched against a polar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupPolicy {
    /// Closest tabulated angle, no interpolation.
    #[default]
    Nearest,
    /// Linear interpolation between the bracketing angles.
    Linear,
}

impl LookupPolicy {
    pub fn lookup(&self, polar: &Polar, alpha: f64) -> Option<PolarPoint> {
        match self {
            LookupPolicy::Nearest => polar.nearest(PolarField::Alpha, alpha).copied(),
            LookupPolicy::Linear => polar.interpolate(PolarField::Alpha, alpha),
        }
    }
}
