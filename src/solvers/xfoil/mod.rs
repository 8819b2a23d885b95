//! XFOIL section-polar adapter.

pub mod results;

pub use results::parse_polar;

use std::fs;
use tracing::debug;

use crate::components::Polar;
use crate::solvers::process::{read_output, ExternalProcess};
use crate::solvers::{SolverSettings, ViscousJob, ViscousSolver};
use crate::utils::{SolverError, SolverKind};

pub const AEROFOIL_FILE: &str = "aerofoil.dat";
pub const POLAR_FILE: &str = "polar.txt";

#[derive(Debug, Clone)]
pub struct XfoilRunner {
    settings: SolverSettings,
}

impl XfoilRunner {
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    // File names stay relative: the executable truncates long paths.
    fn script(job: &ViscousJob<'_>) -> Vec<String> {
        let range = job.alpha_range;
        vec![
            "PLOP".to_string(),
            "G".to_string(),
            String::new(),
            format!("LOAD {}", AEROFOIL_FILE),
            "OPER".to_string(),
            format!("visc {}", job.reynolds_number),
            "PACC".to_string(),
            POLAR_FILE.to_string(),
            String::new(),
            format!("ASEQ {} {} {}", range.start, range.stop, range.step),
            String::new(),
            "QUIT".to_string(),
        ]
    }
}

impl ViscousSolver for XfoilRunner {
    fn polar(&self, job: &ViscousJob<'_>) -> Result<Polar, SolverError> {
        let aerofoil_path = job.workdir.join(AEROFOIL_FILE);
        fs::write(&aerofoil_path, job.aerofoil.to_dat_string())
            .map_err(|e| SolverError::io(SolverKind::Viscous, &aerofoil_path, e))?;

        let mut process =
            ExternalProcess::spawn(SolverKind::Viscous, &self.settings.executable, job.workdir)?;
        process.commands(Self::script(job))?;
        process.finish(self.settings.timeout(), self.settings.poll_interval())?;

        let polar_path = job.workdir.join(POLAR_FILE);
        let content = read_output(
            SolverKind::Viscous,
            &polar_path,
            self.settings.timeout(),
            self.settings.poll_interval(),
        )?;
        let polar = parse_polar(&content, &polar_path, job.reynolds_number)?;
        debug!(
            "Polar for '{}' at Re={:.0}: {} points",
            job.aerofoil.name,
            job.reynolds_number,
            polar.len()
        );
        Ok(polar)
    }
}
