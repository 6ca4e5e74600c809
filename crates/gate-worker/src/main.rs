//! Detached worker: spin for a fixed duration to simulate load, then upload
//! an empty marker object keyed by the dispatched reference.
//!
//! The parent never observes this process. Upload failures are logged and
//! the process still exits 0; a missing argv reference is the one contract
//! violation that exits non-zero.

use std::time::Duration;

use tracing::{error, info};

use gate_exec::{HttpObjectStore, ObjectStore, spin};
use gate_observe::{LoggerConfig, logger_init};

const DEFAULT_BUCKET: &str = "aws-exercice-bucket";
const DEFAULT_SPIN_SECS: u64 = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Logger
    logger_init(&LoggerConfig::from_env()?)?;

    // 2) Reference comes as the single argv element, exactly as dispatched.
    let reference = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: gate-worker <reference>"))?;
    info!(target: "gate.worker", %reference, "worker started");

    // 3) Simulated load
    let spin_secs = std::env::var("GATE_SPIN_SECS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_SPIN_SECS);
    spin(Duration::from_secs(spin_secs)).await;

    // 4) Marker upload. Failures stay inside this process by contract.
    let Ok(endpoint) = std::env::var("GATE_STORE_ENDPOINT") else {
        info!(target: "gate.worker", "GATE_STORE_ENDPOINT unset; skipping upload");
        return Ok(());
    };
    let bucket =
        std::env::var("GATE_STORE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string());

    let store = HttpObjectStore::new(endpoint, bucket);
    match store.put_empty(&reference).await {
        Ok(()) => info!(target: "gate.worker", %reference, "marker uploaded"),
        Err(e) => error!(target: "gate.worker", %reference, error = %e, "marker upload failed"),
    }

    Ok(())
}
