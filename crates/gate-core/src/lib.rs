pub mod error;
pub use error::{CoreError, StoreError};

pub mod token;

pub mod store;
pub use store::{FileStore, MemoryStore, SessionStore};

pub mod service;
pub use service::TokenService;
