use std::io::IsTerminal;
use std::str::FromStr;

use crate::error::LoggerError;
use crate::format::LoggerFormat;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// EnvFilter directive list, e.g. `info` or `info,gate_core=debug`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl LoggerConfig {
    /// Build from `GATE_LOG_LEVEL` / `GATE_LOG_FORMAT`, falling back to the
    /// defaults when unset.
    pub fn from_env() -> Result<Self, LoggerError> {
        let mut cfg = Self::default();
        if let Ok(level) = std::env::var("GATE_LOG_LEVEL") {
            cfg.level = level;
        }
        if let Ok(format) = std::env::var("GATE_LOG_FORMAT") {
            cfg.format = LoggerFormat::from_str(&format)?;
        }
        Ok(cfg)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color,
        }
    }
}
