use std::time::{Duration, Instant};

use tracing::debug;

/// Tick interval between deadline checks. Short enough to keep a core busy.
const TICK: Duration = Duration::from_micros(10);

/// Busy-wait for `duration`, sleeping `TICK` per loop iteration.
///
/// Simulates sustained load: the loop wakes constantly instead of parking
/// once until the deadline. No cancellation path; callers that need one
/// should not be calling this.
pub async fn spin(duration: Duration) {
    let start = Instant::now();
    debug!(target: "gate.exec.spin", secs = duration.as_secs_f64(), "spinning");

    while start.elapsed() < duration {
        tokio::time::sleep(TICK).await;
    }

    debug!(target: "gate.exec.spin", "spin complete");
}
