use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("core error: {0}")]
    Core(#[from] gate_core::CoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Only store failures ever reach the wire; validation outcomes are
        // ordinary responses, not errors.
        error!(target: "gate.api", error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "session store unavailable").into_response()
    }
}
