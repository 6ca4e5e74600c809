//! Tracing bootstrap for the sessiongate binaries.
//!
//! Both `gated` and `gate-worker` call [`logger_init`] once at startup with a
//! [`LoggerConfig`] read from the `GATE_LOG_*` environment.

mod config;
pub use config::LoggerConfig;

mod error;
pub use error::LoggerError;

mod format;
pub use format::LoggerFormat;

use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install the global subscriber described by `cfg`.
///
/// The level string is an `EnvFilter` directive list, so per-target levels
/// like `info,gate_core=debug` work. Installing twice fails with
/// `LoggerError::Init`.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = EnvFilter::try_new(&cfg.level)
        .map_err(|_| LoggerError::InvalidLogLevel(cfg.level.clone()))?;
    let registry = tracing_subscriber::registry().with(filter);

    // Timestamps keep the local offset when the platform exposes it.
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = OffsetTime::new(offset, Rfc3339);

    let result = match cfg.format {
        LoggerFormat::Text => registry
            .with(
                fmt::layer()
                    .with_ansi(cfg.use_color)
                    .with_target(cfg.with_targets)
                    .with_timer(timer),
            )
            .try_init(),
        LoggerFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_target(cfg.with_targets)
                    .with_timer(timer),
            )
            .try_init(),
        #[cfg(all(target_os = "linux", feature = "journald"))]
        LoggerFormat::Journald => {
            let journald = tracing_journald::layer()
                .map_err(|e| LoggerError::Init(format!("journald: {e}")))?;
            registry.with(journald).try_init()
        }
        #[cfg(not(all(target_os = "linux", feature = "journald")))]
        LoggerFormat::Journald => return Err(LoggerError::JournaldNotSupported),
    };

    result.map_err(|e| LoggerError::Init(e.to_string()))
}
