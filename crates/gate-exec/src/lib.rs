pub mod error;
pub use error::ExecError;

pub mod proc;
pub use proc::{Dispatch, ProcDispatcher, TaskHandle};

pub mod spin;
pub use spin::spin;

pub mod store;
pub use store::{HttpObjectStore, ObjectStore};
