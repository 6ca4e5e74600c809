use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::trace;

use gate_model::{SessionId, Token};

use crate::error::StoreError;
use crate::store::SessionStore;

/// Filesystem-backed session store: one JSON file per session.
///
/// The filename is the sha256 hex of the session id, so arbitrary cookie
/// values can never escape the base directory. Writes go through a temp
/// file and rename, keeping each record update atomic on POSIX
/// filesystems.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn record_path(&self, id: &SessionId) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(id.as_str().as_bytes());
        let name = format!("{:x}.json", hasher.finalize());
        self.dir.join(name)
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn get(&self, id: &SessionId) -> Result<Option<Token>, StoreError> {
        let path = self.record_path(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let token = record
            .get("token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| StoreError::Corrupt(format!("no token field in {}", path.display())))?;

        Ok(Some(Token::from(token)))
    }

    async fn put(&self, id: &SessionId, token: Token) -> Result<(), StoreError> {
        let path = self.record_path(id);
        let tmp = path.with_extension("json.tmp");

        let record = json!({ "token": token.as_str() });
        let bytes =
            serde_json::to_vec(&record).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;

        trace!(target: "gate.core.store", session = %id, path = %path.display(), "record written");
        Ok(())
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore").field("dir", &self.dir).finish()
    }
}
