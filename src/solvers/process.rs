use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::utils::{SolverError, SolverKind};

/// An interactive solver driven through its standard input.
///
/// Output goes to `<solver>.log` inside the working directory. The child is
/// killed if the handle is dropped before it exits.
pub struct ExternalProcess {
    solver: SolverKind,
    executable: PathBuf,
    child: Child,
    stdin: Option<ChildStdin>,
    log_path: PathBuf,
}

impl ExternalProcess {
    pub fn spawn(solver: SolverKind, executable: &Path, workdir: &Path) -> Result<Self, SolverError> {
        let log_path = workdir.join(format!("{}.log", solver));
        let log = File::create(&log_path).map_err(|e| SolverError::io(solver, &log_path, e))?;
        let log_err = log
            .try_clone()
            .map_err(|e| SolverError::io(solver, &log_path, e))?;

        let mut child = Command::new(executable)
            .current_dir(workdir)
            .stdin(Stdio::piped())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(log_err))
            .spawn()
            .map_err(|e| SolverError::io(solver, executable, e))?;
        debug!(
            "Spawned {} solver {} (pid {}) in {}",
            solver,
            executable.display(),
            child.id(),
            workdir.display()
        );

        let stdin = child.stdin.take();
        Ok(Self {
            solver,
            executable: executable.to_path_buf(),
            child,
            stdin,
            log_path,
        })
    }

    /// Sends one line of input.
    pub fn command(&mut self, line: &str) -> Result<(), SolverError> {
        let solver = self.solver;
        let executable = &self.executable;
        let stdin = self.stdin.as_mut().ok_or_else(|| {
            SolverError::invocation(solver, executable, "standard input already closed")
        })?;
        writeln!(stdin, "{}", line)
            .and_then(|_| stdin.flush())
            .map_err(|e| SolverError::io(solver, executable, e))
    }

    pub fn commands<I, S>(&mut self, lines: I) -> Result<(), SolverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.command(line.as_ref())?;
        }
        Ok(())
    }

    /// Closes standard input and blocks until the solver exits or `timeout` elapses.
    pub fn finish(mut self, timeout: Duration, poll_interval: Duration) -> Result<(), SolverError> {
        drop(self.stdin.take());
        let deadline = Instant::now() + timeout;
        loop {
            match self.child.try_wait() {
                Ok(Some(status)) if status.success() => return Ok(()),
                Ok(Some(status)) => {
                    return Err(SolverError::invocation(
                        self.solver,
                        &self.executable,
                        format!("exited with {}; log tail: {}", status, self.log_tail()),
                    ))
                }
                Ok(None) if Instant::now() >= deadline => {
                    warn!(
                        "{} solver {} still running after {:?}, killing it",
                        self.solver,
                        self.executable.display(),
                        timeout
                    );
                    let _ = self.child.kill();
                    let _ = self.child.wait();
                    return Err(SolverError::Timeout {
                        solver: self.solver,
                        path: self.executable.clone(),
                        timeout,
                    });
                }
                Ok(None) => thread::sleep(poll_interval),
                Err(e) => return Err(SolverError::io(self.solver, &self.executable, e)),
            }
        }
    }

    fn log_tail(&self) -> String {
        let content = fs::read_to_string(&self.log_path).unwrap_or_default();
        let lines: Vec<&str> = content.lines().collect();
        let start = lines.len().saturating_sub(5);
        lines[start..].join(" | ")
    }
}

impl Drop for ExternalProcess {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Reads a result file written by a solver that has already exited.
///
/// Solvers that detach their writer may still be flushing, so a missing file
/// is polled for until it appears and its size stops changing.
pub fn read_output(
    solver: SolverKind,
    path: &Path,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<String, SolverError> {
    if path.exists() {
        return fs::read_to_string(path).map_err(|e| SolverError::io(solver, path, e));
    }

    let deadline = Instant::now() + timeout;
    let mut last_size = None;
    loop {
        if let Ok(metadata) = fs::metadata(path) {
            let size = metadata.len();
            if last_size == Some(size) {
                return fs::read_to_string(path).map_err(|e| SolverError::io(solver, path, e));
            }
            last_size = Some(size);
        }
        if Instant::now() >= deadline {
            return Err(SolverError::Timeout {
                solver,
                path: path.to_path_buf(),
                timeout,
            });
        }
        thread::sleep(poll_interval);
    }
}
