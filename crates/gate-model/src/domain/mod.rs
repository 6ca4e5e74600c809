mod session_id;
pub use session_id::SessionId;

mod token;
pub use token::Token;

mod verdict;
pub use verdict::Verdict;

mod worker_job;
pub use worker_job::{DEFAULT_SPIN_SECS, WorkerJob};

/// Default number of characters in an issued token.
pub const DEFAULT_TOKEN_LEN: usize = 10;

/// Token length used by the server route (long variant).
pub const SERVER_TOKEN_LEN: usize = 30;
