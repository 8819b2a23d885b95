use aerostudy::analysis::AnalysisConfig;
use aerostudy::utils::SolverKind;
use approx::assert_relative_eq;
use pretty_assertions::assert_eq;

use crate::common::{
    assert_drag_consistent, assert_samples_follow_geometry, config_in, flight_for, regression_mass,
    regression_plane, stub_analysis, CallLog, REGRESSION_INDUCED_DRAG,
};

const REGRESSION_VISCOUS_DRAG: f64 = 0.017256236044657095;

#[test]
fn test_regression_drag_digits() {
    let scratch = tempfile::tempdir().unwrap();
    let plane = regression_plane();
    assert_eq!(plane.reference_area(), 0.5225);

    let log = CallLog::default();
    let study = stub_analysis(&log, config_in(scratch.path()))
        .run(&plane, &flight_for(&plane), &regression_mass())
        .unwrap();

    assert_eq!(study.viscous_drag_coefficient(), REGRESSION_VISCOUS_DRAG);
    assert_eq!(
        study.total_drag_coefficient(),
        REGRESSION_INDUCED_DRAG + REGRESSION_VISCOUS_DRAG
    );
    assert_samples_follow_geometry(&study, &plane);
    assert_drag_consistent(&study);
}

#[test]
fn test_regression_section_operating_points() {
    let scratch = tempfile::tempdir().unwrap();
    let plane = regression_plane();
    let log = CallLog::default();
    let study = stub_analysis(&log, config_in(scratch.path()))
        .run(&plane, &flight_for(&plane), &regression_mass())
        .unwrap();

    let samples = &study.results().surfaces[0].samples;
    let alphas: Vec<f64> = samples.iter().map(|s| s.local_alpha).collect();
    assert_eq!(alphas, vec![2.0, 1.0, 1.0]);

    let drags: Vec<f64> = samples.iter().map(|s| s.drag_coefficient).collect();
    assert_eq!(drags, vec![0.01, 0.0131, 0.050745]);

    assert_relative_eq!(samples[0].reynolds_number, 1.225 * 22.0 * 0.8 / 1.983e-5);
    assert_relative_eq!(samples[2].reynolds_number, 67952.597075, epsilon = 1e-4);

    // One viscous solve per distinct chord, after the single inviscid solve.
    assert_eq!(
        log.calls(),
        vec![
            SolverKind::Inviscid,
            SolverKind::Viscous,
            SolverKind::Viscous,
            SolverKind::Viscous
        ]
    );
}

#[test]
fn test_repeated_runs_are_bit_identical() {
    let scratch = tempfile::tempdir().unwrap();
    let plane = regression_plane();
    let flight = flight_for(&plane);
    let mass = regression_mass();
    let log = CallLog::default();
    let analysis = stub_analysis(&log, config_in(scratch.path()));

    let first = analysis.run(&plane, &flight, &mass).unwrap();
    let second = analysis.run(&plane, &flight, &mass).unwrap();
    assert_eq!(
        first.total_drag_coefficient().to_bits(),
        second.total_drag_coefficient().to_bits()
    );
    assert_eq!(first.results(), second.results());
    assert_ne!(first.id(), second.id());
}

#[test]
fn test_parallel_sweep_matches_sequential() {
    let scratch = tempfile::tempdir().unwrap();
    let plane = regression_plane();
    let flight = flight_for(&plane);
    let mass = regression_mass();

    let sequential = stub_analysis(&CallLog::default(), config_in(scratch.path()))
        .run(&plane, &flight, &mass)
        .unwrap();

    let log = CallLog::default();
    let parallel = stub_analysis(
        &log,
        AnalysisConfig {
            parallel_viscous: true,
            ..config_in(scratch.path())
        },
    )
    .run(&plane, &flight, &mass)
    .unwrap();

    assert_eq!(parallel.results(), sequential.results());
    assert_eq!(parallel.viscous_drag_coefficient(), REGRESSION_VISCOUS_DRAG);
    assert_eq!(log.calls()[0], SolverKind::Inviscid);
    assert_eq!(log.count(SolverKind::Viscous), 3);
}

#[test]
fn test_study_keeps_inputs() {
    let scratch = tempfile::tempdir().unwrap();
    let plane = regression_plane();
    let flight = flight_for(&plane);
    let mass = regression_mass();
    let study = stub_analysis(&CallLog::default(), config_in(scratch.path()))
        .run(&plane, &flight, &mass)
        .unwrap();

    assert_eq!(study.inputs().plane, plane);
    assert_eq!(study.inputs().flight, flight);
    assert_eq!(study.inputs().mass, mass);
    assert_relative_eq!(study.dynamic_pressure(), 0.5 * 1.225 * 22.0 * 22.0);
    assert_eq!(study.trim_alpha(), 2.0);

    let json = study.to_json().unwrap();
    assert!(json.contains("\"viscous_drag_coefficient\""));
    assert!(json.contains(&study.id().to_string()));
}
