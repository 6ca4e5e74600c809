use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::ExecError;

/// Narrow seam over the external object store.
///
/// The worker only ever writes empty marker objects, so the surface is a
/// single operation.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Upload a zero-byte object under `key`.
    async fn put_empty(&self, key: &str) -> Result<(), ExecError>;
}

/// Object store speaking plain HTTP: `PUT {endpoint}/{bucket}/{key}`.
///
/// Works against S3-compatible endpoints that accept unsigned requests
/// (minio in dev, a signing proxy in deployment).
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
}

impl HttpObjectStore {
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            bucket: bucket.into(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.bucket,
            key
        )
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put_empty(&self, key: &str) -> Result<(), ExecError> {
        let url = self.object_url(key);
        trace!(target: "gate.exec.store", %url, "uploading marker object");

        let resp = self
            .client
            .put(&url)
            .body(Vec::new())
            .send()
            .await
            .map_err(|e| ExecError::Upload(e.to_string()))?;

        resp.error_for_status()
            .map_err(|e| ExecError::Upload(e.to_string()))?;

        debug!(target: "gate.exec.store", %key, "marker object uploaded");
        Ok(())
    }
}
