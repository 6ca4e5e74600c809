use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;

use gate_model::{SessionId, Token};

use crate::error::StoreError;

mod file;
pub use file::FileStore;

/// Server-side session state, keyed by the cookie-carried session id.
///
/// Each session holds at most one token; `put` overwrites unconditionally.
/// Backends provide their own read/write atomicity; callers never lock.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Token currently stored for the session, if any.
    async fn get(&self, id: &SessionId) -> Result<Option<Token>, StoreError>;

    /// Store `token` for the session, replacing any previous value.
    async fn put(&self, id: &SessionId, token: Token) -> Result<(), StoreError>;
}

/// In-memory session store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<SessionId, Token>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, id: &SessionId) -> Result<Option<Token>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(map.get(id).cloned())
    }

    async fn put(&self, id: &SessionId, token: Token) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        map.insert(id.clone(), token);
        Ok(())
    }
}
