//! Core contract model for Frostdata: restrictions, constraints, sort
//! criteria, page requests, keyset cursors, and the attribute metamodel.
//!
//! Everything here is an immutable value description of *what to ask for*.
//! Execution belongs to a provider; the conformance crate exercises one.
#![warn(unreachable_pub)]

pub mod constraint;
pub mod error;
pub mod expression;
pub mod metamodel;
pub mod page;
pub mod pattern;
pub mod restriction;
pub mod sort;
pub mod value;

pub use error::Error;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        constraint::Constraint,
        expression::{AttributeRef, Expression},
        page::{Cursor, CursoredPage, Mode, Page, PageRequest},
        pattern::LikePattern,
        restriction::{CompositionType, Restriction},
        sort::{Order, Sort, SortDirection},
        value::Value,
    };
}
