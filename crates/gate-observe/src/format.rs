use std::str::FromStr;

use crate::error::LoggerError;

/// Output format of the installed subscriber.
///
/// `Journald` parses on every platform; whether it can actually be installed
/// is `logger_init`'s decision, so a config file written on a laptop still
/// parses on the server it was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerFormat {
    Text,
    Json,
    Journald,
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LoggerFormat::Text),
            "json" => Ok(LoggerFormat::Json),
            "journald" | "journal" => Ok(LoggerFormat::Journald),
            _ => Err(LoggerError::InvalidFormat(s.to_string())),
        }
    }
}
