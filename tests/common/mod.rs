mod assertions;
mod fixtures;
mod helpers;

// Re-export
pub use assertions::{assert_drag_consistent, assert_samples_follow_geometry};

pub use helpers::*;

pub use fixtures::*;
