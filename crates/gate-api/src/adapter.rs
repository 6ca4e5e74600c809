use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use gate_core::TokenService;
use gate_exec::Dispatch;
use gate_model::{SessionId, Token, Verdict, WorkerJob};

use crate::error::ApiError;
use crate::handler::ApiHandler;

/// Default `ApiHandler`: bridges the token service and the worker
/// dispatcher.
///
/// Dispatch is fire-and-forget: a spawn failure is logged and the request
/// still renders the confirmation page. Only the worker's launch is this
/// crate's concern; its outcome never is.
pub struct GateAdapter {
    service: TokenService,
    dispatcher: Arc<dyn Dispatch>,
    spin_secs: u64,
}

impl GateAdapter {
    pub fn new(service: TokenService, dispatcher: Arc<dyn Dispatch>) -> Self {
        Self {
            service,
            dispatcher,
            spin_secs: gate_model::DEFAULT_SPIN_SECS,
        }
    }

    pub fn with_spin_secs(mut self, secs: u64) -> Self {
        self.spin_secs = secs;
        self
    }
}

#[async_trait]
impl ApiHandler for GateAdapter {
    async fn issue(&self, id: &SessionId) -> Result<Token, ApiError> {
        self.service.issue(id).await.map_err(ApiError::from)
    }

    async fn validate(
        &self,
        id: &SessionId,
        token: Option<String>,
        reference: Option<String>,
    ) -> Result<Verdict, ApiError> {
        // A request without a reference has nothing to dispatch; reject it
        // before touching the store.
        let Some(reference) = reference else {
            return Ok(Verdict::Rejected);
        };

        let verdict = self.service.validate(id, token.as_deref()).await?;

        if verdict.is_accepted() {
            let job = WorkerJob::new(reference).with_spin_secs(self.spin_secs);
            match self.dispatcher.dispatch(&job).await {
                Ok(handle) => {
                    info!(target: "gate.api", session = %id, pid = ?handle.pid, "worker dispatched");
                }
                Err(e) => {
                    warn!(target: "gate.api", session = %id, error = %e, "worker dispatch failed");
                }
            }
        }

        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use gate_core::MemoryStore;
    use gate_exec::{ExecError, TaskHandle};

    /// Dispatcher fake that records every job it sees.
    #[derive(Default)]
    struct Recording {
        jobs: Mutex<Vec<WorkerJob>>,
        fail: bool,
    }

    #[async_trait]
    impl Dispatch for Recording {
        async fn dispatch(&self, job: &WorkerJob) -> Result<TaskHandle, ExecError> {
            self.jobs.lock().unwrap().push(job.clone());
            if self.fail {
                Err(ExecError::Spawn("boom".into()))
            } else {
                Ok(TaskHandle { pid: Some(42) })
            }
        }
    }

    fn adapter_with(dispatcher: Arc<Recording>) -> GateAdapter {
        let service = TokenService::new(Arc::new(MemoryStore::new()));
        GateAdapter::new(service, dispatcher)
    }

    #[tokio::test]
    async fn accepted_validation_dispatches_once() {
        let recording = Arc::new(Recording::default());
        let adapter = adapter_with(recording.clone());
        let id = SessionId::from("s-1");

        let token = adapter.issue(&id).await.unwrap();
        let verdict = adapter
            .validate(&id, Some(token.to_string()), Some("marker".into()))
            .await
            .unwrap();

        assert!(verdict.is_accepted());
        let jobs = recording.jobs.lock().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].reference, "marker");
    }

    #[tokio::test]
    async fn rejected_validation_never_dispatches() {
        let recording = Arc::new(Recording::default());
        let adapter = adapter_with(recording.clone());
        let id = SessionId::from("s-1");
        adapter.issue(&id).await.unwrap();

        let verdict = adapter
            .validate(&id, Some("wrong".into()), Some("marker".into()))
            .await
            .unwrap();

        assert_eq!(verdict, Verdict::Rejected);
        assert!(recording.jobs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_token_is_rejected_without_dispatch() {
        let recording = Arc::new(Recording::default());
        let adapter = adapter_with(recording.clone());
        let id = SessionId::from("s-1");
        adapter.issue(&id).await.unwrap();

        let verdict = adapter
            .validate(&id, None, Some("marker".into()))
            .await
            .unwrap();

        assert_eq!(verdict, Verdict::Rejected);
        assert!(recording.jobs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_reference_is_rejected_without_dispatch() {
        let recording = Arc::new(Recording::default());
        let adapter = adapter_with(recording.clone());
        let id = SessionId::from("s-1");

        let token = adapter.issue(&id).await.unwrap();
        let verdict = adapter
            .validate(&id, Some(token.to_string()), None)
            .await
            .unwrap();

        assert_eq!(verdict, Verdict::Rejected);
        assert!(recording.jobs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn shell_metacharacters_travel_verbatim() {
        let recording = Arc::new(Recording::default());
        let adapter = adapter_with(recording.clone());
        let id = SessionId::from("s-1");

        let token = adapter.issue(&id).await.unwrap();
        adapter
            .validate(&id, Some(token.to_string()), Some("x; echo pwned".into()))
            .await
            .unwrap();

        let jobs = recording.jobs.lock().unwrap();
        assert_eq!(jobs[0].reference, "x; echo pwned");
    }

    #[tokio::test]
    async fn dispatch_failure_is_swallowed() {
        let recording = Arc::new(Recording {
            fail: true,
            ..Default::default()
        });
        let adapter = adapter_with(recording.clone());
        let id = SessionId::from("s-1");

        let token = adapter.issue(&id).await.unwrap();
        let verdict = adapter
            .validate(&id, Some(token.to_string()), Some("marker".into()))
            .await
            .unwrap();

        // The page still renders: worker failures are invisible to callers.
        assert!(verdict.is_accepted());
    }
}
