//! Athena Vortex Lattice adapter.
//!
//! Writes the geometry, trim-case, mass and aerofoil files into the job's
//! working directory, drives the executable through its command menu and
//! reads back the total-force, strip-force and hinge-moment result files.

pub mod input;
pub mod results;

pub use input::{aerofoil_file_name, geometry_file, write_inputs, InputFiles};
pub use results::{AvlResults, ResultText};

use tracing::{debug, info};

use crate::components::{AerodynamicState, Plane};
use crate::solvers::process::{read_output, ExternalProcess};
use crate::solvers::{InviscidJob, InviscidSolver, SolverSettings};
use crate::utils::{SolverError, SolverKind};

pub const TOTAL_FORCES_FILE: &str = "ft.txt";
pub const STRIP_FORCES_FILE: &str = "fs.txt";
pub const HINGE_MOMENTS_FILE: &str = "hm.txt";

/// Result commands issued after the trim has been executed.
const RESULT_COMMANDS: [(&str, &str); 3] = [
    ("ft", TOTAL_FORCES_FILE),
    ("fs", STRIP_FORCES_FILE),
    ("hm", HINGE_MOMENTS_FILE),
];

/// Distinct control surface names in section order.
pub fn control_names(plane: &Plane) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for surface in plane {
        for section in &surface.sections {
            if let Some(control) = &section.control_surface {
                if !names.contains(&control.name) {
                    names.push(control.name.clone());
                }
            }
        }
    }
    names
}

#[derive(Debug, Clone)]
pub struct AvlRunner {
    settings: SolverSettings,
}

impl AvlRunner {
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    fn script(files: &InputFiles) -> Vec<String> {
        let mut lines = vec![
            format!("LOAD {}", files.geometry),
            format!("CASE {}", files.case),
            format!("MASS {}", files.mass),
            "MSET 0".to_string(),
            "OPER".to_string(),
            "c1".to_string(),
            String::new(),
            "X".to_string(),
        ];
        for (command, file) in RESULT_COMMANDS {
            lines.push(format!("{} {}", command, file));
        }
        lines.push(String::new());
        lines.push("QUIT".to_string());
        lines
    }
}

impl InviscidSolver for AvlRunner {
    fn solve(&self, job: &InviscidJob<'_>) -> Result<AerodynamicState, SolverError> {
        let files = write_inputs(job)?;
        debug!(
            "Inviscid inputs for '{}' written to {}",
            job.plane.name,
            job.workdir.display()
        );

        let mut process =
            ExternalProcess::spawn(SolverKind::Inviscid, &self.settings.executable, job.workdir)?;
        process.commands(Self::script(&files))?;
        process.finish(self.settings.timeout(), self.settings.poll_interval())?;

        let read = |name: &str| -> Result<ResultText, SolverError> {
            let path = job.workdir.join(name);
            let content = read_output(
                SolverKind::Inviscid,
                &path,
                self.settings.timeout(),
                self.settings.poll_interval(),
            )?;
            Ok(ResultText::new(path, content))
        };
        let results = AvlResults::new(
            read(TOTAL_FORCES_FILE)?,
            read(STRIP_FORCES_FILE)?,
            read(HINGE_MOMENTS_FILE)?,
        );

        let state = results.to_state(&control_names(job.plane))?;
        info!(
            "Trimmed '{}': alpha={:.3}°, CL={:.4}, CDi={:.5}",
            job.plane.name, state.alpha, state.lift_coefficient, state.induced_drag_coefficient
        );
        Ok(state)
    }
}
