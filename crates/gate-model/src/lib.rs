//! Domain types shared across the sessiongate crates.
//!
//! Pure data: no I/O, no runtime dependencies beyond serde.

mod domain;
pub use domain::*;
