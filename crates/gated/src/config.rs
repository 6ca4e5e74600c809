use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use gate_model::SERVER_TOKEN_LEN;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GATE_SECRET_KEY must be set (the cookie signing key is never hard-coded)")]
    MissingSecret,
    #[error("invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Session store backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    File,
}

impl FromStr for SessionBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(SessionBackend::Memory),
            "file" | "filesystem" => Ok(SessionBackend::File),
            // A networked store stays an external collaborator; selecting it
            // falls back to the filesystem backend.
            "redis" => {
                warn!(target: "gated", "redis backend not wired in; falling back to file");
                Ok(SessionBackend::File)
            }
            other => Err(ConfigError::Invalid {
                name: "GATE_SESSION_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub backend: SessionBackend,
    pub session_dir: PathBuf,
    pub secret_key: String,
    pub token_len: usize,
    pub worker_program: String,
    pub spin_secs: u64,
}

impl ServerConfig {
    /// Read configuration from process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, but with an injectable variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = match var("GATE_BIND") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "GATE_BIND",
                value: raw,
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 5000)),
        };

        let backend = match var("GATE_SESSION_BACKEND") {
            Some(raw) => raw.parse()?,
            None => SessionBackend::File,
        };

        let session_dir = var("GATE_SESSION_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("gate-sessions"));

        let secret_key = var("GATE_SECRET_KEY").ok_or(ConfigError::MissingSecret)?;

        let token_len = match var("GATE_TOKEN_LEN") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "GATE_TOKEN_LEN",
                value: raw,
            })?,
            None => SERVER_TOKEN_LEN,
        };

        let worker_program = var("GATE_WORKER_PROGRAM").unwrap_or_else(|| "gate-worker".into());

        let spin_secs = match var("GATE_SPIN_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "GATE_SPIN_SECS",
                value: raw,
            })?,
            None => gate_model::DEFAULT_SPIN_SECS,
        };

        Ok(Self {
            bind,
            backend,
            session_dir,
            secret_key,
            token_len,
            worker_program,
            spin_secs,
        })
    }
}
