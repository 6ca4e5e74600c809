use serde::{Deserialize, Serialize};

/// Default number of seconds the worker spins before uploading its marker.
pub const DEFAULT_SPIN_SECS: u64 = 10;

/// Transient description of one worker dispatch.
///
/// Never persisted. The `reference` string is forwarded to the worker
/// verbatim as a single argv element and later used as the object key for
/// the marker upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerJob {
    pub reference: String,
    pub spin_secs: u64,
}

impl WorkerJob {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            spin_secs: DEFAULT_SPIN_SECS,
        }
    }

    pub fn with_spin_secs(mut self, secs: u64) -> Self {
        self.spin_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_kept_verbatim() {
        let job = WorkerJob::new("x; echo pwned");
        assert_eq!(job.reference, "x; echo pwned");
        assert_eq!(job.spin_secs, DEFAULT_SPIN_SECS);
    }

    #[test]
    fn serde_uses_camel_case() {
        let job = WorkerJob::new("marker").with_spin_secs(3);
        let json = serde_json::to_string(&job).unwrap();
        assert_eq!(json, r#"{"reference":"marker","spinSecs":3}"#);
    }
}
