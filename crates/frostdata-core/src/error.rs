use crate::{
    constraint::ConstraintError, expression::ExpressionError, metamodel::MetamodelError,
    page::PageError, pattern::PatternError, restriction::RestrictionError, sort::SortError,
};
use thiserror::Error as ThisError;

///
/// Error
///
/// Aggregate over the per-surface construction errors. Every failure in this
/// crate is synchronous and atomic: a factory either returns a complete
/// immutable value or fails with one of these, never partial state.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error(transparent)]
    Restriction(#[from] RestrictionError),

    #[error(transparent)]
    Sort(#[from] SortError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Metamodel(#[from] MetamodelError),
}
