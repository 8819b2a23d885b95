use std::fs;

use crate::components::{Plane, Section, Surface};
use crate::solvers::InviscidJob;
use crate::utils::{SolverError, SolverKind, CDO_REFERENCE};

pub const GEOMETRY_FILE: &str = "plane.avl";
pub const CASE_FILE: &str = "trim.run";
pub const MASS_FILE: &str = "plane.mass";

/// File names written into the working directory, relative to it.
#[derive(Debug, Clone, PartialEq)]
pub struct InputFiles {
    pub geometry: String,
    pub case: String,
    pub mass: String,
}

pub fn aerofoil_file_name(surface: usize, section: usize) -> String {
    format!("surf{}_sec{}_af.txt", surface, section)
}

fn reference_block(plane: &Plane) -> String {
    let lines = [
        plane.name.clone(),
        "0.0                      Mach".to_string(),
        "0     0     0.0          iYsym  iZsym  Zsym".to_string(),
        format!(
            "{} {}  {}          Sref   Cref   Bref   reference area, chord, span",
            plane.reference_area(),
            plane.reference_chord(),
            plane.reference_span()
        ),
        format!(
            "{} {}   {}          Xref   Yref   Zref   moment reference location (arb.)",
            plane.moment_reference.x, plane.moment_reference.y, plane.moment_reference.z
        ),
        format!("{:.3}                    CDoref", CDO_REFERENCE),
        "#".to_string(),
    ];
    lines.join("\n")
}

fn surface_block(surface: &Surface) -> String {
    let duplicate = if surface.reflect { "YDUPLICATE\n     0" } else { "" };
    let lines = [
        "#".to_string(),
        "SURFACE".to_string(),
        surface.name.clone(),
        format!(
            "{}  {}  {}  {}  !  Nchord   Cspace   Nspan  Sspace",
            surface.mesh.chordwise,
            surface.mesh.chord_spacing,
            surface.mesh.spanwise,
            surface.mesh.span_spacing
        ),
        "#".to_string(),
        "# reflect image wing about y=0 plane".to_string(),
        duplicate.to_string(),
        "#".to_string(),
        "# twist angle bias for whole surface".to_string(),
        "ANGLE".to_string(),
        format!("     {}", surface.angle_bias),
        "#".to_string(),
        "# x,y,z bias for whole surface".to_string(),
        "TRANSLATE".to_string(),
        format!(
            "    {}     {}     {}",
            surface.translation.x, surface.translation.y, surface.translation.z
        ),
        format!("#{}", "-".repeat(62)),
    ];
    lines.join("\n")
}

fn section_block(section: &Section, aerofoil_file: &str) -> String {
    let control = section
        .control_surface
        .as_ref()
        .map(|control| format!("CONTROL\n{}", control.to_geometry_line()))
        .unwrap_or_default();
    let lines = [
        "#    Xle         Yle         Zle         chord       angle   Nspan  Sspace".to_string(),
        "SECTION".to_string(),
        format!(
            "     {}     {}     {}     {}         {}",
            section.leading_edge.x,
            section.leading_edge.y,
            section.leading_edge.z,
            section.chord,
            section.twist
        ),
        control,
        "AFIL".to_string(),
        aerofoil_file.to_string(),
        format!("#{}", "-".repeat(23)),
    ];
    lines.join("\n")
}

/// Renders the geometry file describing every surface of the plane.
pub fn geometry_file(plane: &Plane) -> String {
    let mut blocks = vec![reference_block(plane)];
    for (i, surface) in plane.iter().enumerate() {
        blocks.push(format!("#{}", "=".repeat(62)));
        blocks.push(surface_block(surface));
        for (j, section) in surface.sections.iter().enumerate() {
            blocks.push(section_block(section, &aerofoil_file_name(i, j)));
        }
    }
    blocks.join("\n")
}

/// Writes geometry, trim case, mass and aerofoil files into the job's working directory.
pub fn write_inputs(job: &InviscidJob<'_>) -> Result<InputFiles, SolverError> {
    let write = |name: &str, content: String| -> Result<(), SolverError> {
        let path = job.workdir.join(name);
        fs::write(&path, content).map_err(|e| SolverError::io(SolverKind::Inviscid, path, e))
    };

    write(GEOMETRY_FILE, geometry_file(job.plane))?;
    write(CASE_FILE, job.flight.to_case_file())?;
    write(
        MASS_FILE,
        job.mass
            .to_mass_file(job.flight.gravity(), job.flight.density()),
    )?;

    for (i, surface) in job.plane.iter().enumerate() {
        for (j, section) in surface.sections.iter().enumerate() {
            write(&aerofoil_file_name(i, j), section.aerofoil.to_dat_string())?;
        }
    }

    Ok(InputFiles {
        geometry: GEOMETRY_FILE.to_string(),
        case: CASE_FILE.to_string(),
        mass: MASS_FILE.to_string(),
    })
}
