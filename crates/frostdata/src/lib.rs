//! ## Crate layout
//! - `core`: the contract model — values, constraints, restrictions, sort
//!   criteria, page requests, keyset cursors, and the attribute metamodel.
//! - `conformance` (separate crate): provider contract, reference in-memory
//!   provider, and the conformance suite.
//!
//! The `prelude` module mirrors the surface application code uses when
//! building restrictions and page requests.

pub use frostdata_core as core;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::Error;

///
/// Prelude
///

pub mod prelude {
    pub use frostdata_core::prelude::*;
}
