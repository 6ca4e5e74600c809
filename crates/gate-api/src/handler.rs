use async_trait::async_trait;

use gate_model::{SessionId, Token, Verdict};

use crate::error::ApiError;

/// Session-token API handler.
///
/// Abstracts the backend so the HTTP layer can be exercised against fakes
/// and so deployments can wrap the default `GateAdapter` with extra logic.
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    /// Issue a fresh token for the session, overwriting any previous one.
    async fn issue(&self, id: &SessionId) -> Result<Token, ApiError>;

    /// Validate a client-supplied token and, on acceptance, dispatch the
    /// worker with `reference`. Missing parameters are Rejected, never an
    /// error.
    async fn validate(
        &self,
        id: &SessionId,
        token: Option<String>,
        reference: Option<String>,
    ) -> Result<Verdict, ApiError>;
}
