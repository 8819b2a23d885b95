use aerostudy::analysis::{AerodynamicAnalysis, AnalysisConfig};

use crate::common::{CallLog, StubInviscid, StubViscous};

pub type StubAnalysis = AerodynamicAnalysis<StubInviscid, StubViscous>;

/// Analysis over the default stand-ins, scratch space under `scratch_root`.
pub fn stub_analysis(log: &CallLog, config: AnalysisConfig) -> StubAnalysis {
    AerodynamicAnalysis::new(StubInviscid::new(log.clone()), StubViscous::new(log.clone()))
        .with_config(config)
}

pub fn config_in(scratch_root: &std::path::Path) -> AnalysisConfig {
    AnalysisConfig {
        scratch_root: Some(scratch_root.to_path_buf()),
        ..Default::default()
    }
}

/// Entries left behind in a directory.
pub fn leftovers(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
