mod error;
pub use error::ApiError;

mod handler;
pub use handler::ApiHandler;

mod adapter;
pub use adapter::GateAdapter;

mod cookie;
pub use cookie::{CookieCodec, SESSION_COOKIE};

mod http;
pub use http::HttpApi;

pub use axum;
