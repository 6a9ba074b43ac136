mod results;

#[cfg(test)]
mod tests;

use crate::{sort::Sort, value::Value};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

// re-exports
pub use results::{CursoredPage, Page};

/// Page size used when a request is built without an explicit size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

///
/// PageError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PageError {
    #[error("page numbers are 1-based; page 0 is not addressable")]
    ZeroPage,

    #[error("page size must be at least 1")]
    ZeroSize,

    #[error("keyset cursor requires at least one element")]
    EmptyKeyset,

    #[error(
        "cursor-mode requests traverse through query results; next()/previous() apply to offset mode only"
    )]
    CursorTraversal,

    #[error("totals were not requested for this page; rebuild the request with with_total()")]
    TotalsNotRequested,

    #[error("page content and cursor counts differ: {content} rows, {cursors} cursors")]
    CursorCountMismatch { content: usize, cursors: usize },

    #[error("no next page is available")]
    NoNextPage,

    #[error("no previous page is available")]
    NoPreviousPage,
}

///
/// Cursor
///
/// Ordered, non-empty keyset marking a position in a sorted result set: one
/// element per active sort criterion, in criterion order. Equality and
/// hashing are element-wise and order-sensitive.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    elements: Vec<Value>,
}

impl Cursor {
    pub fn new(elements: Vec<Value>) -> Result<Self, PageError> {
        if elements.is_empty() {
            return Err(PageError::EmptyKeyset);
        }

        Ok(Self { elements })
    }

    #[must_use]
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }
}

///
/// Mode
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Mode {
    #[display("OFFSET")]
    Offset,
    #[display("CURSOR_NEXT")]
    CursorNext,
    #[display("CURSOR_PREVIOUS")]
    CursorPrevious,
}

///
/// PageState
///
/// Offset position or cursor position. The representation makes the mode
/// invariant structural: a cursor-mode request always carries a non-empty
/// cursor, an offset-mode request never does.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
enum PageState {
    Offset { page: u64 },
    CursorNext { cursor: Cursor },
    CursorPrevious { cursor: Cursor },
}

///
/// PageRequest
///
/// Immutable description of one requested page: position (offset page number
/// or keyset cursor), page size, sort criteria, and whether the result
/// should carry total counts. All `with`-style operations return new
/// instances.
///
/// In cursor mode the element count and order of the cursor must match the
/// active sort criteria; that alignment is a caller obligation, and
/// providers reject mismatches.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    state: PageState,
    size: u64,
    sorts: Vec<Sort>,
    request_total: bool,
}

impl PageRequest {
    /// Offset request for the given 1-based page number, default size.
    pub fn of_page(page: u64) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::ZeroPage);
        }

        Ok(Self {
            state: PageState::Offset { page },
            size: DEFAULT_PAGE_SIZE,
            sorts: Vec::new(),
            request_total: true,
        })
    }

    /// Offset request for page 1 with the given size.
    pub fn of_size(size: u64) -> Result<Self, PageError> {
        Self::of_page(1)?.with_size(size)
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        match &self.state {
            PageState::Offset { .. } => Mode::Offset,
            PageState::CursorNext { .. } => Mode::CursorNext,
            PageState::CursorPrevious { .. } => Mode::CursorPrevious,
        }
    }

    /// The 1-based page number; `None` in cursor mode.
    #[must_use]
    pub const fn page(&self) -> Option<u64> {
        match &self.state {
            PageState::Offset { page } => Some(*page),
            _ => None,
        }
    }

    /// The keyset cursor; `None` in offset mode.
    #[must_use]
    pub const fn cursor(&self) -> Option<&Cursor> {
        match &self.state {
            PageState::Offset { .. } => None,
            PageState::CursorNext { cursor } | PageState::CursorPrevious { cursor } => {
                Some(cursor)
            }
        }
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    #[must_use]
    pub const fn requests_total(&self) -> bool {
        self.request_total
    }

    /// Number of rows preceding the requested page; offset mode only.
    #[must_use]
    pub const fn offset(&self) -> Option<u64> {
        match &self.state {
            PageState::Offset { page } => Some((*page - 1) * self.size),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Withers
    // ------------------------------------------------------------------

    /// Offset request positioned at the given 1-based page number.
    pub fn with_page(&self, page: u64) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::ZeroPage);
        }

        Ok(Self {
            state: PageState::Offset { page },
            ..self.clone()
        })
    }

    /// Same request with a new page size.
    pub fn with_size(&self, size: u64) -> Result<Self, PageError> {
        if size == 0 {
            return Err(PageError::ZeroSize);
        }

        Ok(Self {
            size,
            ..self.clone()
        })
    }

    /// Same request with the given sort criteria (replacing any existing
    /// ones).
    #[must_use]
    pub fn sort_by(&self, sorts: impl IntoIterator<Item = Sort>) -> Self {
        Self {
            sorts: sorts.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Request total element/page counts on the result.
    #[must_use]
    pub fn with_total(&self) -> Self {
        Self {
            request_total: true,
            ..self.clone()
        }
    }

    /// Opt out of total counts; the performance escape hatch for cursor-mode
    /// and large result sets.
    #[must_use]
    pub fn without_total(&self) -> Self {
        Self {
            request_total: false,
            ..self.clone()
        }
    }

    // ------------------------------------------------------------------
    // Cursor entry points
    // ------------------------------------------------------------------

    /// Request the page of results after the given keyset values.
    pub fn after_keyset(&self, keyset: Vec<Value>) -> Result<Self, PageError> {
        Cursor::new(keyset).map(|cursor| self.after_cursor(cursor))
    }

    /// Request the page of results before the given keyset values.
    pub fn before_keyset(&self, keyset: Vec<Value>) -> Result<Self, PageError> {
        Cursor::new(keyset).map(|cursor| self.before_cursor(cursor))
    }

    /// Request the page of results after the given cursor.
    #[must_use]
    pub fn after_cursor(&self, cursor: Cursor) -> Self {
        Self {
            state: PageState::CursorNext { cursor },
            ..self.clone()
        }
    }

    /// Request the page of results before the given cursor.
    #[must_use]
    pub fn before_cursor(&self, cursor: Cursor) -> Self {
        Self {
            state: PageState::CursorPrevious { cursor },
            ..self.clone()
        }
    }

    // ------------------------------------------------------------------
    // Offset traversal
    // ------------------------------------------------------------------

    /// The next offset page. Cursor-mode requests traverse through the
    /// query result instead ([`CursoredPage::next_page_request`]).
    pub fn next(&self) -> Result<Self, PageError> {
        match &self.state {
            PageState::Offset { page } => Ok(Self {
                state: PageState::Offset { page: page + 1 },
                ..self.clone()
            }),
            _ => Err(PageError::CursorTraversal),
        }
    }

    /// The previous offset page, or `None` from page 1. Cursor-mode requests
    /// traverse through the query result instead.
    pub fn previous(&self) -> Result<Option<Self>, PageError> {
        match &self.state {
            PageState::Offset { page: 1 } => Ok(None),
            PageState::Offset { page } => Ok(Some(Self {
                state: PageState::Offset { page: page - 1 },
                ..self.clone()
            })),
            _ => Err(PageError::CursorTraversal),
        }
    }
}
