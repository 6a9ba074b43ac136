use crate::record::Record;
use frostdata_core::{
    page::{CursoredPage, Page, PageError, PageRequest},
    restriction::Restriction,
};
use thiserror::Error as ThisError;

///
/// ProviderError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ProviderError {
    #[error("keyset cursor arity mismatch: expected {expected} elements, found {found}")]
    CursorArityMismatch { expected: usize, found: usize },

    #[error("keyset traversal requires at least one sort criterion")]
    MissingSort,

    #[error(transparent)]
    Page(#[from] PageError),
}

///
/// QueryProvider
///
/// The contract the conformance suite exercises. A provider interprets a
/// restriction plus a page request and materializes result pages whose
/// derived next/previous requests follow the core model's rules.
///
/// Providers must reject a cursor whose element count does not match the
/// request's sort criteria.
///

pub trait QueryProvider {
    /// Execute a restricted, ordered query; keyset-capable.
    ///
    /// The request's sort list dictates keyset column order and must be
    /// non-empty.
    fn select(
        &self,
        restriction: &Restriction,
        request: &PageRequest,
    ) -> Result<CursoredPage<Record>, ProviderError>;

    /// Execute an offset-mode query, returning a numbered page.
    fn select_page(
        &self,
        restriction: &Restriction,
        request: &PageRequest,
    ) -> Result<Page<Record>, ProviderError>;

    /// Count the rows matching a restriction.
    fn count(&self, restriction: &Restriction) -> u64;
}
