use aerostudy::analysis::{AerodynamicAnalysis, AnalysisConfig};
use aerostudy::components::{FlightCondition, MassArrangement, Plane};
use aerostudy::utils::{AnalysisError, SectionRef, SolverError, SolverKind, SolverLocation};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::time::Duration;

use crate::common::{
    config_in, flight_for, leftovers, regression_mass, regression_plane, stub_analysis, CallLog,
    StubInviscid, StubViscous,
};

fn inviscid_timeout() -> SolverError {
    SolverError::Timeout {
        solver: SolverKind::Inviscid,
        path: PathBuf::from("ft.txt"),
        timeout: Duration::from_secs(60),
    }
}

fn inviscid_crash() -> SolverError {
    SolverError::invocation(SolverKind::Inviscid, "avl", "exited with exit status: 139")
}

fn run_with(
    log: &CallLog,
    viscous: StubViscous,
    config: AnalysisConfig,
    plane: &Plane,
) -> Result<aerostudy::AerodynamicStudy, AnalysisError> {
    AerodynamicAnalysis::new(StubInviscid::new(log.clone()), viscous)
        .with_config(config)
        .run(plane, &flight_for(plane), &regression_mass())
}

#[test]
fn test_inviscid_failure_stops_before_viscous_work() {
    for failure in [inviscid_timeout as fn() -> SolverError, inviscid_crash] {
        let scratch = tempfile::tempdir().unwrap();
        let plane = regression_plane();
        let log = CallLog::default();
        let analysis = AerodynamicAnalysis::new(
            StubInviscid::failing(log.clone(), failure),
            StubViscous::new(log.clone()),
        )
        .with_config(config_in(scratch.path()));

        let err = analysis
            .run(&plane, &flight_for(&plane), &regression_mass())
            .unwrap_err();
        assert_eq!(log.calls(), vec![SolverKind::Inviscid]);
        assert_eq!(analysis.viscous_solver().call_count(), 0);
        match err {
            AnalysisError::Solver { location, source } => {
                assert_eq!(location, SolverLocation::Plane("regression".to_string()));
                assert_eq!(source.solver(), SolverKind::Inviscid);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(leftovers(scratch.path()), 0);
    }
}

#[test]
fn test_viscous_failure_names_the_sections() {
    let scratch = tempfile::tempdir().unwrap();
    let plane = regression_plane();
    let log = CallLog::default();
    let err = run_with(
        &log,
        StubViscous::new(log.clone()).failing_above(1.0e6),
        config_in(scratch.path()),
        &plane,
    )
    .unwrap_err();

    match &err {
        AnalysisError::Solver { location, source } => {
            assert_eq!(
                *location,
                SolverLocation::Sections(vec![SectionRef {
                    surface: 0,
                    surface_name: "wing".to_string(),
                    section: 0,
                }])
            );
            assert!(matches!(source, SolverError::OutputParse { field, .. } if field == "table"));
        }
        other => panic!("unexpected error {:?}", other),
    }
    let message = err.to_string();
    assert!(message.contains("surface 0 'wing' section 0"), "{}", message);
    assert!(message.contains("polar.txt"), "{}", message);
    assert_eq!(leftovers(scratch.path()), 0);
}

#[test]
fn test_parallel_viscous_failure_returns_no_study() {
    let scratch = tempfile::tempdir().unwrap();
    let plane = regression_plane();
    let log = CallLog::default();
    let result = run_with(
        &log,
        StubViscous::new(log.clone()).failing_above(1.0e5),
        AnalysisConfig {
            parallel_viscous: true,
            ..config_in(scratch.path())
        },
        &plane,
    );
    let err = result.unwrap_err();
    assert_eq!(err.solver_error().map(SolverError::solver), Some(SolverKind::Viscous));
    assert_eq!(log.calls()[0], SolverKind::Inviscid);
}

#[test]
fn test_empty_polar_is_an_output_error() {
    let scratch = tempfile::tempdir().unwrap();
    let plane = regression_plane();
    let log = CallLog::default();
    let err = run_with(
        &log,
        StubViscous::new(log.clone()).empty(),
        config_in(scratch.path()),
        &plane,
    )
    .unwrap_err();
    assert!(matches!(
        err.solver_error(),
        Some(SolverError::OutputParse { solver: SolverKind::Viscous, .. })
    ));
}

fn assert_rejected_before_solving(plane: &Plane, flight: &FlightCondition) {
    let scratch = tempfile::tempdir().unwrap();
    let log = CallLog::default();
    let err = stub_analysis(&log, config_in(scratch.path()))
        .run(plane, flight, &MassArrangement::default())
        .unwrap_err();
    assert!(
        matches!(err, AnalysisError::Configuration(_)),
        "unexpected error {:?}",
        err
    );
    assert!(log.calls().is_empty(), "solver called: {:?}", log.calls());
    assert_eq!(leftovers(scratch.path()), 0);
}

#[test]
fn test_geometry_violations_fail_fast() {
    let valid = regression_plane();
    let flight = flight_for(&valid);

    let mut zero_chord = valid.clone();
    zero_chord.surfaces[0].sections[2].chord = 0.0;
    assert_rejected_before_solving(&zero_chord, &flight);

    let mut negative_chord = valid.clone();
    negative_chord.surfaces[0].sections[1].chord = -0.3;
    assert_rejected_before_solving(&negative_chord, &flight);

    let mut unordered = valid.clone();
    unordered.surfaces[0].sections.swap(1, 2);
    assert_rejected_before_solving(&unordered, &flight);

    let mut offset_root = valid.clone();
    offset_root.surfaces[0].sections[0].leading_edge.y = 0.1;
    assert_rejected_before_solving(&offset_root, &flight);

    let mut no_sections = valid.clone();
    no_sections.surfaces[0].sections.clear();
    assert_rejected_before_solving(&no_sections, &flight);

    let no_surfaces = Plane::new("empty", Vec::new());
    assert_rejected_before_solving(&no_surfaces, &flight);
}

#[test]
fn test_inconsistent_reference_area_fails_fast() {
    let plane = regression_plane();
    let flight = FlightCondition::new(plane.reference_area() / 2.0).unwrap();
    assert_rejected_before_solving(&plane, &flight);
}

#[test]
fn test_invalid_config_fails_fast() {
    let scratch = tempfile::tempdir().unwrap();
    let plane = regression_plane();
    let log = CallLog::default();
    let config = AnalysisConfig {
        reference_viscosity: -1.0,
        ..config_in(scratch.path())
    };
    let err = stub_analysis(&log, config)
        .run(&plane, &flight_for(&plane), &regression_mass())
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Configuration(_)));
    assert!(log.calls().is_empty());
}

#[test]
fn test_single_section_surface_adds_no_drag() {
    let scratch = tempfile::tempdir().unwrap();
    let mut plane = regression_plane();
    let mut stub = plane.surfaces[0].clone();
    stub.name = "stub".to_string();
    stub.sections.truncate(1);
    plane.surfaces.push(stub);

    let log = CallLog::default();
    let study = stub_analysis(&log, config_in(scratch.path()))
        .run(&plane, &flight_for(&plane), &regression_mass())
        .unwrap();
    assert_eq!(study.results().surface_drag_areas[1], 0.0);
    assert_eq!(study.viscous_drag_coefficient(), 0.017256236044657095);
    // The stub root matches the wing root, so no extra solve is needed.
    assert_eq!(log.count(SolverKind::Viscous), 3);
}
