use std::sync::Arc;

use tracing::{debug, instrument};

use gate_model::{SessionId, Token, Verdict};

use crate::{error::CoreError, store::SessionStore, token};

/// Issues per-session tokens and validates client-supplied candidates.
///
/// Holds the store behind the `SessionStore` seam so backends can be swapped
/// at startup (memory, filesystem) without touching this logic.
pub struct TokenService {
    store: Arc<dyn SessionStore>,
    token_len: usize,
}

impl TokenService {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            token_len: gate_model::DEFAULT_TOKEN_LEN,
        }
    }

    pub fn with_token_len(mut self, len: usize) -> Self {
        self.token_len = len;
        self
    }

    /// Generate a fresh token and store it for the session, replacing any
    /// previously issued value.
    #[instrument(level = "debug", skip(self), fields(session = %id))]
    pub async fn issue(&self, id: &SessionId) -> Result<Token, CoreError> {
        let token = token::generate(self.token_len);
        self.store.put(id, token.clone()).await?;
        debug!(target: "gate.core", "token issued");
        Ok(token)
    }

    /// Compare `supplied` against the session's stored token.
    ///
    /// A missing parameter and a session with no stored token are both
    /// Rejected; only a store failure is an error.
    #[instrument(level = "debug", skip(self, supplied), fields(session = %id))]
    pub async fn validate(
        &self,
        id: &SessionId,
        supplied: Option<&str>,
    ) -> Result<Verdict, CoreError> {
        let Some(supplied) = supplied else {
            debug!(target: "gate.core", "no token parameter supplied");
            return Ok(Verdict::Rejected);
        };

        let Some(stored) = self.store.get(id).await? else {
            debug!(target: "gate.core", "session has no stored token");
            return Ok(Verdict::Rejected);
        };

        if stored.matches(supplied) {
            Ok(Verdict::Accepted(stored))
        } else {
            debug!(target: "gate.core", "token mismatch");
            Ok(Verdict::Rejected)
        }
    }
}
