use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace, warn};

use gate_model::WorkerJob;

use crate::error::ExecError;

/// Handle returned by a dispatch. Fire-and-forget by contract: there is no
/// join, no timeout and no cancellation path; the pid is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle {
    pub pid: Option<u32>,
}

/// Launches a worker for a validated request.
#[async_trait]
pub trait Dispatch: Send + Sync + 'static {
    async fn dispatch(&self, job: &WorkerJob) -> Result<TaskHandle, ExecError>;
}

/// Dispatcher that spawns a detached worker process.
///
/// The job's `reference` travels as a single argv element. There is no shell
/// anywhere in this path, so metacharacters in `reference` are inert.
#[derive(Clone, Debug)]
pub struct ProcDispatcher {
    program: String,
    base_args: Vec<String>,
    env: Vec<(String, String)>,
    cwd: Option<PathBuf>,
}

impl ProcDispatcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
            env: Vec::new(),
            cwd: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Full argv for a job: configured base args, then the reference as one
    /// discrete element.
    fn argv(&self, job: &WorkerJob) -> Vec<String> {
        let mut args = self.base_args.clone();
        args.push(job.reference.clone());
        args
    }
}

#[async_trait]
impl Dispatch for ProcDispatcher {
    async fn dispatch(&self, job: &WorkerJob) -> Result<TaskHandle, ExecError> {
        if self.program.is_empty() {
            return Err(ExecError::MissingProgram);
        }

        let args = self.argv(job);
        trace!(target: "gate.exec.proc", program = %self.program, args = ?args, "spawn");

        let mut cmd = Command::new(&self.program);
        cmd.args(&args);
        cmd.env("GATE_SPIN_SECS", job.spin_secs.to_string());
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd.stdin(std::process::Stdio::null());
        cmd.kill_on_drop(false);

        let mut child = cmd.spawn().map_err(|e| ExecError::Spawn(e.to_string()))?;
        let pid = child.id();
        debug!(target: "gate.exec.proc", ?pid, "worker spawned");

        // Reap in the background so the child never zombies; the exit status
        // is logged and goes nowhere else.
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => {
                    debug!(target: "gate.exec.proc", ?pid, "worker exited cleanly");
                }
                Ok(status) => {
                    warn!(target: "gate.exec.proc", ?pid, code = ?status.code(), "worker exited non-zero");
                }
                Err(e) => {
                    warn!(target: "gate.exec.proc", ?pid, error = %e, "worker wait failed");
                }
            }
        });

        Ok(TaskHandle { pid })
    }
}
