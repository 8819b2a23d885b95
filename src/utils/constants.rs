pub const GRAVITY: f64 = 9.81; // m/s^2, trim-case default
pub const ISA_SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m^3

/// Viscosity-like divisor of section Reynolds numbers, overridden through `AnalysisConfig`.
pub const REFERENCE_VISCOSITY: f64 = 1.983e-5;

// Viscous sweep window around the local angle of attack (degrees)
pub const ALPHA_SWEEP_BELOW: f64 = 2.0;
pub const ALPHA_SWEEP_ABOVE: f64 = 1.0;
pub const ALPHA_SWEEP_STEP: f64 = 0.5;

// External process limits
pub const DEFAULT_SOLVER_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Profile drag reference written into geometry files.
pub const CDO_REFERENCE: f64 = 0.020;
