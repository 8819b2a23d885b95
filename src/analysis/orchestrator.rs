//! Couples the inviscid trim with per-section viscous polars.
//!
//! A run walks `Init -> InviscidSolve -> ViscousSweep -> Integrate -> Done`.
//! Any error moves it to `Failed` and no study is produced. No viscous call is
//! made unless the inviscid solve succeeded.

use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::analysis::config::AnalysisConfig;
use crate::analysis::integrator::{SectionSample, SurfaceSamples};
use crate::analysis::study::{AerodynamicStudy, StudyInputs, StudyResults};
use crate::components::{
    AerodynamicState, Aerofoil, FlightCondition, MassArrangement, Plane, Polar,
};
use crate::solvers::{InviscidJob, InviscidSolver, ViscousJob, ViscousSolver};
use crate::utils::{AnalysisError, SectionRef, SolverError, SolverKind, SolverLocation};

const SCRATCH_PREFIX: &str = "aerostudy-";

/// Relative tolerance between the flight condition's and the plane's reference area.
const AREA_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Init,
    InviscidSolve,
    ViscousSweep,
    Integrate,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::InviscidSolve => "inviscid solve",
            Stage::ViscousSweep => "viscous sweep",
            Stage::Integrate => "integrate",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Local flow at one section once the trim angle is known.
#[derive(Debug, Clone, Copy)]
struct OperatingPoint {
    local_alpha: f64,
    reynolds_number: f64,
    group: usize,
}

/// Sections sharing an aerofoil, a Reynolds number and a sweep grid, served
/// by one polar.
#[derive(Debug)]
struct ViscousGroup<'a> {
    aerofoil: &'a Aerofoil,
    reynolds_number: f64,
    sections: Vec<SectionRef>,
    angles: Vec<f64>,
}

#[derive(Debug)]
struct GroupPolar {
    polar: Polar,
    workdir: PathBuf,
}

/// Drives one inviscid solver and one viscous solver through a study.
pub struct AerodynamicAnalysis<I, V> {
    inviscid: I,
    viscous: V,
    config: AnalysisConfig,
}

impl<I, V> AerodynamicAnalysis<I, V>
where
    I: InviscidSolver,
    V: ViscousSolver,
{
    pub fn new(inviscid: I, viscous: V) -> Self {
        Self {
            inviscid,
            viscous,
            config: AnalysisConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn inviscid_solver(&self) -> &I {
        &self.inviscid
    }

    pub fn viscous_solver(&self) -> &V {
        &self.viscous
    }

    /// Runs the full coupled analysis. Results are all-or-nothing.
    pub fn run(
        &self,
        plane: &Plane,
        flight: &FlightCondition,
        mass: &MassArrangement,
    ) -> Result<AerodynamicStudy, AnalysisError> {
        let mut stage = Stage::Init;
        match self.execute(plane, flight, mass, &mut stage) {
            Ok(study) => {
                advance(&mut stage, Stage::Done);
                info!(
                    "Study {} of '{}': alpha={:.3}°, CL={:.4}, CDv={:.6}, CD={:.6}",
                    study.id(),
                    plane.name,
                    study.trim_alpha(),
                    study.lift_coefficient(),
                    study.viscous_drag_coefficient(),
                    study.total_drag_coefficient()
                );
                Ok(study)
            }
            Err(e) => {
                warn!("Analysis of '{}' failed during {}: {}", plane.name, stage, e);
                advance(&mut stage, Stage::Failed);
                Err(e)
            }
        }
    }

    fn execute(
        &self,
        plane: &Plane,
        flight: &FlightCondition,
        mass: &MassArrangement,
        stage: &mut Stage,
    ) -> Result<AerodynamicStudy, AnalysisError> {
        self.check_inputs(plane, flight, mass)?;
        let scratch = self.scratch_dir()?;
        debug!("Scratch directory {}", scratch.path().display());

        advance(stage, Stage::InviscidSolve);
        let state = self.solve_inviscid(scratch.path(), plane, flight, mass)?;

        advance(stage, Stage::ViscousSweep);
        let surfaces = self.sweep_viscous(scratch.path(), plane, flight, &state)?;

        advance(stage, Stage::Integrate);
        let surface_drag_areas: Vec<f64> = surfaces.iter().map(SurfaceSamples::drag_area).collect();
        let mut drag_area = 0.0;
        for area in &surface_drag_areas {
            drag_area += area;
        }
        let viscous_drag_coefficient = drag_area / plane.reference_area();
        let total_drag_coefficient = state.induced_drag_coefficient + viscous_drag_coefficient;

        Ok(AerodynamicStudy::new(
            StudyInputs {
                plane: plane.clone(),
                flight: *flight,
                mass: mass.clone(),
            },
            StudyResults {
                inviscid: state,
                surfaces,
                surface_drag_areas,
                viscous_drag_coefficient,
                total_drag_coefficient,
            },
        ))
    }

    fn check_inputs(
        &self,
        plane: &Plane,
        flight: &FlightCondition,
        mass: &MassArrangement,
    ) -> Result<(), AnalysisError> {
        self.config.validate()?;
        plane.validate()?;
        flight.validate()?;

        let plane_area = plane.reference_area();
        if (flight.reference_area() - plane_area).abs() > AREA_TOLERANCE * plane_area {
            return Err(AnalysisError::Configuration(format!(
                "flight condition reference area {} differs from plane '{}' reference area {}",
                flight.reference_area(),
                plane.name,
                plane_area
            )));
        }

        let total_mass = mass.total_mass();
        if flight.mass() != total_mass {
            warn!(
                "Flight condition mass {} kg differs from '{}' arrangement total {} kg",
                flight.mass(),
                mass.name,
                total_mass
            );
        }
        Ok(())
    }

    fn scratch_dir(&self) -> Result<TempDir, AnalysisError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let dir = match &self.config.scratch_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(dir)
    }

    fn solve_inviscid(
        &self,
        scratch: &Path,
        plane: &Plane,
        flight: &FlightCondition,
        mass: &MassArrangement,
    ) -> Result<AerodynamicState, AnalysisError> {
        let workdir = tempfile::Builder::new()
            .prefix("inviscid-")
            .tempdir_in(scratch)?;
        let job = InviscidJob {
            plane,
            mass,
            flight,
            workdir: workdir.path(),
        };
        self.inviscid
            .solve(&job)
            .map_err(|source| AnalysisError::Solver {
                location: SolverLocation::Plane(plane.name.clone()),
                source,
            })
    }

    fn sweep_viscous(
        &self,
        scratch: &Path,
        plane: &Plane,
        flight: &FlightCondition,
        state: &AerodynamicState,
    ) -> Result<Vec<SurfaceSamples>, AnalysisError> {
        let (operating_points, groups) = self.group_sections(plane, flight, state);
        debug!(
            "{} sections of '{}' share {} viscous solves",
            plane.section_count(),
            plane.name,
            groups.len()
        );

        let viscous = &self.viscous;
        let config = &self.config;
        let polars: Vec<GroupPolar> = if config.parallel_viscous {
            groups
                .par_iter()
                .enumerate()
                .map(|(index, group)| solve_group(viscous, config, scratch, index, group))
                .collect::<Result<_, _>>()?
        } else {
            groups
                .iter()
                .enumerate()
                .map(|(index, group)| solve_group(viscous, config, scratch, index, group))
                .collect::<Result<_, _>>()?
        };

        let mut surfaces = Vec::with_capacity(plane.surfaces.len());
        for (i, (surface, points)) in plane.iter().zip(&operating_points).enumerate() {
            let mut samples = Vec::with_capacity(surface.len());
            for (j, (section, point)) in surface.sections.iter().zip(points).enumerate() {
                let group = &polars[point.group];
                let polar_point = config
                    .lookup
                    .lookup(&group.polar, point.local_alpha)
                    .ok_or_else(|| AnalysisError::Solver {
                        location: SolverLocation::Sections(vec![SectionRef {
                            surface: i,
                            surface_name: surface.name.clone(),
                            section: j,
                        }]),
                        source: SolverError::parse(
                            SolverKind::Viscous,
                            &group.workdir,
                            "alpha",
                            format!("no polar point matches alpha {}", point.local_alpha),
                        ),
                    })?;
                samples.push(SectionSample {
                    chord: section.chord,
                    span_position: section.y(),
                    drag_coefficient: polar_point.cd,
                    local_alpha: point.local_alpha,
                    reynolds_number: point.reynolds_number,
                    polar_point,
                });
            }
            surfaces.push(SurfaceSamples {
                surface: surface.name.clone(),
                reflect: surface.reflect,
                samples,
            });
        }
        Ok(surfaces)
    }

    /// Operating point per section, and the distinct viscous groups in order
    /// of first appearance.
    ///
    /// Sections join a group only when their local angle sits a whole number
    /// of sweep steps from the other members, so every member reads its own row.
    fn group_sections<'p>(
        &self,
        plane: &'p Plane,
        flight: &FlightCondition,
        state: &AerodynamicState,
    ) -> (Vec<Vec<OperatingPoint>>, Vec<ViscousGroup<'p>>) {
        let mut groups: Vec<ViscousGroup<'p>> = Vec::new();
        let mut index: HashMap<(&'p Aerofoil, u64, i64), usize> = HashMap::new();
        let mut operating_points = Vec::with_capacity(plane.surfaces.len());

        for (i, surface) in plane.iter().enumerate() {
            let mut points = Vec::with_capacity(surface.len());
            for (j, section) in surface.sections.iter().enumerate() {
                let local_alpha = section.twist + state.alpha;
                let reynolds_number =
                    self.config
                        .reynolds_number(flight.density(), flight.velocity(), section.chord);
                let offset = self.config.alpha_sweep.grid_offset(local_alpha);
                let group = *index
                    .entry((&section.aerofoil, reynolds_number.to_bits(), offset))
                    .or_insert_with(|| {
                        groups.push(ViscousGroup {
                            aerofoil: &section.aerofoil,
                            reynolds_number,
                            sections: Vec::new(),
                            angles: Vec::new(),
                        });
                        groups.len() - 1
                    });
                groups[group].sections.push(SectionRef {
                    surface: i,
                    surface_name: surface.name.clone(),
                    section: j,
                });
                groups[group].angles.push(local_alpha);
                points.push(OperatingPoint {
                    local_alpha,
                    reynolds_number,
                    group,
                });
            }
            operating_points.push(points);
        }
        (operating_points, groups)
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!("Analysis stage {} -> {}", stage, next);
    *stage = next;
}

fn solve_group<V: ViscousSolver>(
    viscous: &V,
    config: &AnalysisConfig,
    scratch: &Path,
    index: usize,
    group: &ViscousGroup<'_>,
) -> Result<GroupPolar, AnalysisError> {
    let fail = |source: SolverError| AnalysisError::Solver {
        location: SolverLocation::Sections(group.sections.clone()),
        source,
    };

    let workdir = tempfile::Builder::new()
        .prefix(&format!("viscous-{}-", index))
        .tempdir_in(scratch)?;
    let job = ViscousJob {
        aerofoil: group.aerofoil,
        reynolds_number: group.reynolds_number,
        alpha_range: config.alpha_sweep.around(&group.angles),
        workdir: workdir.path(),
    };
    debug!(
        "Viscous solve {} for '{}' at Re={:.0}, alpha {:.2}..{:.2}",
        index,
        group.aerofoil.name,
        group.reynolds_number,
        job.alpha_range.start,
        job.alpha_range.stop
    );

    let polar = viscous.polar(&job).map_err(fail)?;
    if polar.is_empty() {
        return Err(fail(SolverError::parse(
            SolverKind::Viscous,
            workdir.path(),
            "polar",
            "sweep produced no converged points",
        )));
    }
    Ok(GroupPolar {
        polar,
        workdir: workdir.path().to_path_buf(),
    })
}
