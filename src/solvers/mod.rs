pub mod avl;
pub mod process;
mod settings;
mod traits;
pub mod xfoil;

pub use avl::AvlRunner;
pub use process::{read_output, ExternalProcess};
pub use settings::SolverSettings;
pub use traits::{AlphaRange, InviscidJob, InviscidSolver, ViscousJob, ViscousSolver};
pub use xfoil::XfoilRunner;
