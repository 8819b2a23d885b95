use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::{AnalysisError, GRAVITY, ISA_SEA_LEVEL_DENSITY};

/// Named fields of a trim case, in the order they are written to file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseParameter {
    Cl,
    Alpha,
    Beta,
    RollRate,
    PitchRate,
    Cdo,
    Bank,
    Elevation,
    Heading,
    Mach,
    Velocity,
    Density,
    Gravity,
    TurnRadius,
    LoadFactor,
    XCg,
    YCg,
    ZCg,
    Mass,
    Ixx,
    Iyy,
    Izz,
    Ixy,
    Iyz,
    Izx,
    ViscClAlpha,
    ViscClU,
    ViscCmAlpha,
    ViscCmU,
}

impl CaseParameter {
    pub const ALL: [CaseParameter; 29] = [
        CaseParameter::Cl,
        CaseParameter::Alpha,
        CaseParameter::Beta,
        CaseParameter::RollRate,
        CaseParameter::PitchRate,
        CaseParameter::Cdo,
        CaseParameter::Bank,
        CaseParameter::Elevation,
        CaseParameter::Heading,
        CaseParameter::Mach,
        CaseParameter::Velocity,
        CaseParameter::Density,
        CaseParameter::Gravity,
        CaseParameter::TurnRadius,
        CaseParameter::LoadFactor,
        CaseParameter::XCg,
        CaseParameter::YCg,
        CaseParameter::ZCg,
        CaseParameter::Mass,
        CaseParameter::Ixx,
        CaseParameter::Iyy,
        CaseParameter::Izz,
        CaseParameter::Ixy,
        CaseParameter::Iyz,
        CaseParameter::Izx,
        CaseParameter::ViscClAlpha,
        CaseParameter::ViscClU,
        CaseParameter::ViscCmAlpha,
        CaseParameter::ViscCmU,
    ];

    /// Key used in trim-case files.
    pub fn key(&self) -> &'static str {
        match self {
            CaseParameter::Cl => "cl",
            CaseParameter::Alpha => "alpha",
            CaseParameter::Beta => "beta",
            CaseParameter::RollRate => "pb/2v",
            CaseParameter::PitchRate => "qc/2v",
            CaseParameter::Cdo => "cdo",
            CaseParameter::Bank => "bank",
            CaseParameter::Elevation => "elevation",
            CaseParameter::Heading => "heading",
            CaseParameter::Mach => "mach",
            CaseParameter::Velocity => "velocity",
            CaseParameter::Density => "density",
            CaseParameter::Gravity => "gravity",
            CaseParameter::TurnRadius => "turn_radius",
            CaseParameter::LoadFactor => "load factor",
            CaseParameter::XCg => "x cg",
            CaseParameter::YCg => "y cg",
            CaseParameter::ZCg => "z cg",
            CaseParameter::Mass => "mass",
            CaseParameter::Ixx => "ixx",
            CaseParameter::Iyy => "iyy",
            CaseParameter::Izz => "izz",
            CaseParameter::Ixy => "ixy",
            CaseParameter::Iyz => "iyz",
            CaseParameter::Izx => "izx",
            CaseParameter::ViscClAlpha => "visc cl a",
            CaseParameter::ViscClU => "visc cl u",
            CaseParameter::ViscCmAlpha => "visc cm a",
            CaseParameter::ViscCmU => "visc cm u",
        }
    }

    pub fn default_value(&self) -> f64 {
        match self {
            CaseParameter::Velocity => 1.0,
            CaseParameter::Density => ISA_SEA_LEVEL_DENSITY,
            CaseParameter::Gravity => GRAVITY,
            CaseParameter::LoadFactor => 1.0,
            _ => 0.0,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for CaseParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CaseParameter {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaseParameter::ALL
            .iter()
            .copied()
            .find(|parameter| parameter.key() == s)
            .ok_or_else(|| {
                AnalysisError::InvalidParameter(format!(
                    "'{}' is not a trim case parameter",
                    s
                ))
            })
    }
}

/// The flight condition an analysis is trimmed at.
///
/// An immutable value: every setter returns a new condition. The lift
/// coefficient is always derived from weight, dynamic pressure and
/// reference area and cannot be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightCondition {
    reference_area: f64,
    values: [f64; 29],
}

impl FlightCondition {
    pub fn new(reference_area: f64) -> Result<Self, AnalysisError> {
        if !(reference_area.is_finite() && reference_area > 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "reference area must be positive, got {}",
                reference_area
            )));
        }
        let mut values = [0.0; 29];
        for parameter in CaseParameter::ALL {
            values[parameter.index()] = parameter.default_value();
        }
        Ok(Self {
            reference_area,
            values,
        })
    }

    /// Returns a copy with the named field changed, e.g. `with("velocity", 22.0)`.
    pub fn with(self, key: &str, value: f64) -> Result<Self, AnalysisError> {
        self.with_parameter(key.parse()?, value)
    }

    pub fn with_parameter(
        mut self,
        parameter: CaseParameter,
        value: f64,
    ) -> Result<Self, AnalysisError> {
        match parameter {
            CaseParameter::Cl => {
                return Err(AnalysisError::InvalidParameter(
                    "cl is derived from the trim condition and cannot be set".to_string(),
                ))
            }
            CaseParameter::Velocity | CaseParameter::Density if !(value > 0.0) => {
                return Err(AnalysisError::InvalidParameter(format!(
                    "{} must be strictly positive, got {}",
                    parameter, value
                )))
            }
            _ if !value.is_finite() => {
                return Err(AnalysisError::InvalidParameter(format!(
                    "{} must be finite, got {}",
                    parameter, value
                )))
            }
            _ => {}
        }
        self.values[parameter.index()] = value;
        Ok(self)
    }

    /// Re-checks the positivity invariants, e.g. after deserializing.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.velocity() > 0.0 && self.density() > 0.0 && self.reference_area > 0.0) {
            return Err(AnalysisError::Configuration(format!(
                "flight condition needs positive velocity, density and reference area \
                 (got {}, {}, {})",
                self.velocity(),
                self.density(),
                self.reference_area
            )));
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<f64, AnalysisError> {
        Ok(self.value(key.parse()?))
    }

    pub fn value(&self, parameter: CaseParameter) -> f64 {
        match parameter {
            CaseParameter::Cl => self.trim_lift_coefficient(),
            _ => self.values[parameter.index()],
        }
    }

    pub fn reference_area(&self) -> f64 {
        self.reference_area
    }

    pub fn velocity(&self) -> f64 {
        self.value(CaseParameter::Velocity)
    }

    pub fn density(&self) -> f64 {
        self.value(CaseParameter::Density)
    }

    pub fn gravity(&self) -> f64 {
        self.value(CaseParameter::Gravity)
    }

    pub fn mass(&self) -> f64 {
        self.value(CaseParameter::Mass)
    }

    pub fn weight(&self) -> f64 {
        self.mass() * self.gravity()
    }

    pub fn dynamic_pressure(&self) -> f64 {
        0.5 * self.density() * self.velocity() * self.velocity()
    }

    /// Lift coefficient needed to carry the weight at this speed.
    pub fn trim_lift_coefficient(&self) -> f64 {
        self.mass() * self.gravity()
            / (0.5 * self.density() * self.velocity() * self.velocity() * self.reference_area)
    }

    /// Renders the run-case file read by the inviscid solver.
    pub fn to_case_file(&self) -> String {
        let mut content = format!(
            "---------------------------------------------\n \
             Run case  1:  0 deg. bank\n\n \
             alpha        ->  CL          =  {}\n \
             beta         ->  Cl roll mom =   0.00000\n \
             pb/2V        ->  pb/2V       =   0.00000\n \
             qc/2V        ->  qc/2V       =   0.00000\n \
             rb/2V        ->  rb/2V       =   0.00000\n \
             elevator     ->  Cm pitchmom =   0.00000\n\n",
            self.trim_lift_coefficient()
        );
        for parameter in CaseParameter::ALL {
            content.push_str(&format!("{} = {}\n", parameter, self.value(parameter)));
        }
        content
    }
}
