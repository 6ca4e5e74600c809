use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format {0:?} (expected text, json or journald)")]
    InvalidFormat(String),
    #[error("invalid log level filter {0:?}")]
    InvalidLogLevel(String),
    #[error("journald output requires linux and the journald feature")]
    JournaldNotSupported,
    #[error("subscriber install failed: {0}")]
    Init(String),
}
