mod planes;
mod solvers;

// Re-export test fixtures
pub use planes::*;
pub use solvers::*;
