use aerostudy::components::{
    Aerofoil, FlightCondition, MassArrangement, Plane, PointMass, Section, Surface,
};
use nalgebra::Vector3;

pub const REGRESSION_VELOCITY: f64 = 22.0;
pub const REGRESSION_MASS: f64 = 2.0;

/// Symmetric NACA four-digit profile of the given thickness-to-chord ratio.
pub fn symmetric_aerofoil(name: &str, thickness: f64) -> Aerofoil {
    let count = 20;
    let half_thickness = |x: f64| {
        5.0 * thickness
            * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x * x + 0.2843 * x.powi(3)
                - 0.1015 * x.powi(4))
    };
    let stations: Vec<f64> = (0..=count)
        .map(|i| 0.5 * (1.0 - (std::f64::consts::PI * i as f64 / count as f64).cos()))
        .collect();

    let mut points: Vec<[f64; 2]> = stations
        .iter()
        .rev()
        .map(|&x| [x, half_thickness(x)])
        .collect();
    points.extend(stations.iter().skip(1).map(|&x| [x, -half_thickness(x)]));
    Aerofoil::new(name, points)
}

/// Reflected three-section wing of the drag regression case.
pub fn regression_plane() -> Plane {
    let foil = symmetric_aerofoil("regression", 0.2);
    let wing = Surface::new("wing")
        .with_sections([
            Section::new(0.8, foil.clone()),
            Section::new(0.3, foil.clone())
                .with_leading_edge(0.25, 0.3, 0.0)
                .with_twist(-1.0),
            Section::new(0.05, foil)
                .with_leading_edge(0.5, 0.85, 0.0)
                .with_twist(-1.0),
        ])
        .reflected(true);
    Plane::new("regression", vec![wing])
}

/// Wing plus an unreflected fin, sharing one aerofoil.
pub fn two_surface_plane() -> Plane {
    let foil = symmetric_aerofoil("naca0012", 0.12);
    let wing = Surface::new("wing")
        .with_sections([
            Section::new(0.4, foil.clone()),
            Section::new(0.4, foil.clone()).with_leading_edge(0.0, 1.0, 0.0),
        ])
        .reflected(true);
    let fin = Surface::new("fin").with_sections([
        Section::new(0.2, foil.clone()),
        Section::new(0.1, foil).with_leading_edge(0.1, 0.3, 0.0),
    ]);
    Plane::new("twin", vec![wing, fin])
}

pub fn flight_for(plane: &Plane) -> FlightCondition {
    FlightCondition::new(plane.reference_area())
        .and_then(|f| f.with("velocity", REGRESSION_VELOCITY))
        .and_then(|f| f.with("mass", REGRESSION_MASS))
        .expect("valid flight condition")
}

pub fn regression_mass() -> MassArrangement {
    MassArrangement::new("regression")
        .with_mass(PointMass::new(1.5, Vector3::new(0.2, 0.0, 0.0)))
        .with_mass(PointMass::new(0.5, Vector3::new(0.6, 0.0, 0.0)))
}
