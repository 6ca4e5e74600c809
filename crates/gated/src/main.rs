use std::sync::Arc;

use tracing::info;

use gate_api::{CookieCodec, GateAdapter, HttpApi};
use gate_core::{FileStore, MemoryStore, SessionStore, TokenService};
use gate_exec::ProcDispatcher;
use gate_observe::{LoggerConfig, logger_init};

mod config;
use config::{ServerConfig, SessionBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Logger
    let logger_cfg = LoggerConfig::from_env()?;
    logger_init(&logger_cfg)?;
    info!("logger initialized");

    // 2) Configuration
    let cfg = ServerConfig::from_env()?;
    info!(bind = %cfg.bind, backend = ?cfg.backend, "configuration loaded");

    // 3) Session store
    let store: Arc<dyn SessionStore> = match cfg.backend {
        SessionBackend::Memory => Arc::new(MemoryStore::new()),
        SessionBackend::File => Arc::new(FileStore::open(&cfg.session_dir).await?),
    };
    info!("session store ready");

    // 4) Core service + worker dispatcher
    let service = TokenService::new(store).with_token_len(cfg.token_len);
    let dispatcher = Arc::new(ProcDispatcher::new(&cfg.worker_program));
    info!(program = %cfg.worker_program, "worker dispatcher ready");

    // 5) HTTP surface
    let adapter = GateAdapter::new(service, dispatcher).with_spin_secs(cfg.spin_secs);
    let codec = CookieCodec::new(cfg.secret_key);
    let router = HttpApi::new(Arc::new(adapter), codec).router();

    // 6) Serve until Ctrl+C
    let listener = tokio::net::TcpListener::bind(cfg.bind).await?;
    info!(addr = %cfg.bind, "listening");

    gate_api::axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down...");
        })
        .await?;

    Ok(())
}
