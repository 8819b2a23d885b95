use aerostudy::components::{AerodynamicState, Polar, PolarPoint};
use aerostudy::solvers::{InviscidJob, InviscidSolver, ViscousJob, ViscousSolver};
use aerostudy::utils::{SolverError, SolverKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Induced drag reported by the stand-in inviscid solver.
pub const REGRESSION_INDUCED_DRAG: f64 = 0.11138;
pub const REGRESSION_TRIM_ALPHA: f64 = 2.0;

/// Order in which solvers were called, shared between the two stand-ins.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<SolverKind>>>);

impl CallLog {
    pub fn record(&self, kind: SolverKind) {
        self.0.lock().unwrap().push(kind);
    }

    pub fn calls(&self) -> Vec<SolverKind> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, kind: SolverKind) -> usize {
        self.calls().iter().filter(|k| **k == kind).count()
    }
}

/// Section drag as a step function of Reynolds number.
pub fn regression_drag(reynolds_number: f64) -> f64 {
    if reynolds_number > 8.0e5 {
        0.01
    } else if reynolds_number > 2.0e5 {
        0.0131
    } else {
        0.050745
    }
}

pub struct StubInviscid {
    pub log: CallLog,
    pub state: AerodynamicState,
    pub failure: Option<fn() -> SolverError>,
}

impl StubInviscid {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            state: AerodynamicState::new(REGRESSION_TRIM_ALPHA, 0.45, REGRESSION_INDUCED_DRAG),
            failure: None,
        }
    }

    pub fn failing(log: CallLog, failure: fn() -> SolverError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(log)
        }
    }
}

impl InviscidSolver for StubInviscid {
    fn solve(&self, job: &InviscidJob<'_>) -> Result<AerodynamicState, SolverError> {
        self.log.record(SolverKind::Inviscid);
        assert!(job.workdir.is_dir(), "inviscid working directory missing");
        match self.failure {
            Some(failure) => Err(failure()),
            None => Ok(self.state.clone()),
        }
    }
}

/// Viscous stand-in: every swept angle gets `cd(Re) + slope * alpha`.
pub struct StubViscous {
    pub log: CallLog,
    pub calls: AtomicUsize,
    pub cd_slope: f64,
    /// Reynolds numbers above which the solve fails.
    pub fail_above: Option<f64>,
    pub empty: bool,
    pub requests: Mutex<Vec<(f64, f64, f64)>>,
}

impl StubViscous {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            calls: AtomicUsize::new(0),
            cd_slope: 0.0,
            fail_above: None,
            empty: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_cd_slope(mut self, slope: f64) -> Self {
        self.cd_slope = slope;
        self
    }

    pub fn failing_above(mut self, reynolds_number: f64) -> Self {
        self.fail_above = Some(reynolds_number);
        self
    }

    pub fn empty(mut self) -> Self {
        self.empty = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (Reynolds number, sweep start, sweep stop) of every request.
    pub fn requests(&self) -> Vec<(f64, f64, f64)> {
        let mut requests = self.requests.lock().unwrap().clone();
        requests.sort_by(|a, b| a.0.total_cmp(&b.0));
        requests
    }
}

impl ViscousSolver for StubViscous {
    fn polar(&self, job: &ViscousJob<'_>) -> Result<Polar, SolverError> {
        self.log.record(SolverKind::Viscous);
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(job.workdir.is_dir(), "viscous working directory missing");
        let range = job.alpha_range;
        self.requests
            .lock()
            .unwrap()
            .push((job.reynolds_number, range.start, range.stop));

        if matches!(self.fail_above, Some(limit) if job.reynolds_number > limit) {
            return Err(SolverError::parse(
                SolverKind::Viscous,
                job.workdir.join("polar.txt"),
                "table",
                "no column separator",
            ));
        }
        if self.empty {
            return Ok(Polar::new(job.reynolds_number, Vec::new()));
        }

        let base = regression_drag(job.reynolds_number);
        let points = range
            .angles()
            .into_iter()
            .map(|alpha| PolarPoint::new(alpha, 0.11 * alpha, base + self.cd_slope * alpha, -0.05))
            .collect();
        Ok(Polar::new(job.reynolds_number, points))
    }
}
