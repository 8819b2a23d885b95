use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Which external tool an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverKind {
    Inviscid,
    Viscous,
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverKind::Inviscid => write!(f, "inviscid"),
            SolverKind::Viscous => write!(f, "viscous"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("{solver} solver invocation failed ({target}): {reason}")]
    Invocation {
        solver: SolverKind,
        target: PathBuf,
        reason: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("{solver} solver produced no {} within {timeout:?}", .path.display())]
    Timeout {
        solver: SolverKind,
        path: PathBuf,
        timeout: Duration,
    },

    #[error("{solver} solver output {} has no valid '{field}': {reason}", .path.display())]
    OutputParse {
        solver: SolverKind,
        path: PathBuf,
        field: String,
        reason: String,
    },
}

impl SolverError {
    pub fn invocation(solver: SolverKind, target: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SolverError::Invocation {
            solver,
            target: target.into(),
            reason: reason.into(),
            source: None,
        }
    }

    pub fn io(solver: SolverKind, target: impl Into<PathBuf>, source: io::Error) -> Self {
        SolverError::Invocation {
            solver,
            target: target.into(),
            reason: source.to_string(),
            source: Some(source),
        }
    }

    pub fn parse(
        solver: SolverKind,
        path: impl Into<PathBuf>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SolverError::OutputParse {
            solver,
            path: path.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn solver(&self) -> SolverKind {
        match self {
            SolverError::Invocation { solver, .. }
            | SolverError::Timeout { solver, .. }
            | SolverError::OutputParse { solver, .. } => *solver,
        }
    }
}

/// One section of one surface, as referenced by an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRef {
    pub surface: usize,
    pub surface_name: String,
    pub section: usize,
}

impl fmt::Display for SectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "surface {} '{}' section {}",
            self.surface, self.surface_name, self.section
        )
    }
}

/// The part of the plane a failed solver call was working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverLocation {
    Plane(String),
    Sections(Vec<SectionRef>),
}

impl fmt::Display for SolverLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverLocation::Plane(name) => write!(f, "plane '{}'", name),
            SolverLocation::Sections(sections) => {
                let names: Vec<String> = sections.iter().map(|s| s.to_string()).collect();
                write!(f, "{}", names.join(", "))
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Solver error at {location}: {source}")]
    Solver {
        location: SolverLocation,
        #[source]
        source: SolverError,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AnalysisError {
    /// The underlying solver failure, if this error came from an external tool.
    pub fn solver_error(&self) -> Option<&SolverError> {
        match self {
            AnalysisError::Solver { source, .. } => Some(source),
            _ => None,
        }
    }
}
