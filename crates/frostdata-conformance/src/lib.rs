//! Conformance kit for Frostdata providers.
//!
//! A provider under test implements [`QueryProvider`]; the suite in
//! [`suite`] exercises it against the standard dataset. [`MemoryProvider`]
//! is the reference implementation the suite is validated against.
#![warn(unreachable_pub)]

pub mod eval;
pub mod memory;
pub mod ordering;
pub mod provider;
pub mod record;
pub mod suite;

pub use memory::MemoryProvider;
pub use provider::{ProviderError, QueryProvider};
pub use record::{FieldPresence, Record};
pub use suite::{ConformanceError, run_all, standard_dataset};
