use aerostudy::analysis::AerodynamicStudy;
use aerostudy::components::Plane;

/// Assert that a study carries one sample per section, in section order
#[track_caller]
pub fn assert_samples_follow_geometry(study: &AerodynamicStudy, plane: &Plane) {
    let surfaces = &study.results().surfaces;
    assert_eq!(surfaces.len(), plane.surfaces.len(), "surface count");
    for (samples, surface) in surfaces.iter().zip(plane.iter()) {
        assert_eq!(samples.surface, surface.name);
        assert_eq!(samples.reflect, surface.reflect);
        assert_eq!(samples.samples.len(), surface.len(), "{} sample count", surface.name);
        for (sample, section) in samples.samples.iter().zip(&surface.sections) {
            assert_eq!(sample.chord, section.chord);
            assert_eq!(sample.span_position, section.y());
            assert_eq!(sample.drag_coefficient, sample.polar_point.cd);
        }
    }
}

/// Assert that the drag bookkeeping of a study is self-consistent
#[track_caller]
pub fn assert_drag_consistent(study: &AerodynamicStudy) {
    let results = study.results();
    assert!(results.viscous_drag_coefficient.is_finite());
    assert!(results.viscous_drag_coefficient >= 0.0);
    assert_eq!(
        results.total_drag_coefficient,
        results.inviscid.induced_drag_coefficient + results.viscous_drag_coefficient
    );
    assert_eq!(results.surface_drag_areas.len(), results.surfaces.len());
    for (area, samples) in results.surface_drag_areas.iter().zip(&results.surfaces) {
        assert_eq!(*area, samples.drag_area());
    }
}
