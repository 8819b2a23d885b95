mod aerofoil;
mod control;
mod plane;
mod section;
mod surface;

pub use aerofoil::Aerofoil;
pub use control::{ControlSurface, DeflectionType};
pub use plane::Plane;
pub use section::Section;
pub use surface::{MeshDefinition, Surface};

use nalgebra::Vector3;

pub(crate) fn origin() -> Vector3<f64> {
    Vector3::zeros()
}
