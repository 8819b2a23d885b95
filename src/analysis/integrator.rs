//! Closed-form spanwise integration of section drag.
//!
//! Between two adjacent stations chord and drag coefficient are both taken to
//! vary linearly, so `∫ c(s)·cd(s) ds` over the strip has an exact polynomial
//! form. Summing the strips gives the surface's drag per unit dynamic pressure.

use serde::{Deserialize, Serialize};

use crate::components::PolarPoint;

/// Operating point and viscous drag of one section for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionSample {
    pub chord: f64,
    /// Spanwise coordinate of the leading edge (m).
    pub span_position: f64,
    pub drag_coefficient: f64,
    /// Section twist plus trim angle of attack (degrees).
    pub local_alpha: f64,
    pub reynolds_number: f64,
    /// Polar row the drag coefficient was taken from.
    pub polar_point: PolarPoint,
}

impl SectionSample {
    /// A sample carrying only what the integral reads.
    pub fn new(chord: f64, span_position: f64, drag_coefficient: f64) -> Self {
        Self {
            chord,
            span_position,
            drag_coefficient,
            local_alpha: 0.0,
            reynolds_number: 0.0,
            polar_point: PolarPoint::new(0.0, 0.0, drag_coefficient, 0.0),
        }
    }
}

/// Ordered samples of one surface, in section order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSamples {
    pub surface: String,
    pub reflect: bool,
    pub samples: Vec<SectionSample>,
}

impl SurfaceSamples {
    pub fn drag_area(&self) -> f64 {
        surface_drag_area(&self.samples, self.reflect)
    }
}

fn strip_drag_area(inner: &SectionSample, outer: &SectionSample) -> f64 {
    let span = outer.span_position - inner.span_position;
    if span == 0.0 {
        return 0.0;
    }
    let (c0, d0) = (inner.chord, inner.drag_coefficient);
    let mc = (outer.chord - c0) / span;
    let mv = (outer.drag_coefficient - d0) / span;
    let span2 = span * span;
    let span3 = span2 * span;
    mc * mv * span3 / 3.0 + (c0 * mv + d0 * mc) * span2 / 2.0 + c0 * d0 * span
}

/// Drag per unit dynamic pressure of one surface (m²).
///
/// A single sample has no strip and contributes nothing. Reflected surfaces
/// count their mirror image too.
pub fn surface_drag_area(samples: &[SectionSample], reflect: bool) -> f64 {
    let mut total = 0.0;
    for pair in samples.windows(2) {
        total += strip_drag_area(&pair[0], &pair[1]);
    }
    if reflect {
        total * 2.0
    } else {
        total
    }
}
