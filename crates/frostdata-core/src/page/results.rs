//! Value-level result wrappers a provider returns. The provider fills them
//! in; the wrappers derive the next/previous page requests from this model's
//! offset and cursor rules.

use crate::page::{Cursor, PageError, PageRequest};

///
/// Page
///
/// Offset-mode result page: content, the originating request, and totals if
/// they were requested.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    content: Vec<T>,
    request: PageRequest,
    total_elements: Option<u64>,
    has_next: bool,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(
        content: Vec<T>,
        request: PageRequest,
        total_elements: Option<u64>,
        has_next: bool,
    ) -> Self {
        Self {
            content,
            request,
            total_elements,
            has_next,
        }
    }

    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[must_use]
    pub const fn request(&self) -> &PageRequest {
        &self.request
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Total number of matching elements across all pages.
    ///
    /// Fails when the originating request opted out of totals.
    pub fn total_elements(&self) -> Result<u64, PageError> {
        self.total_elements.ok_or(PageError::TotalsNotRequested)
    }

    /// Total number of pages, derived from the element total and page size.
    pub fn total_pages(&self) -> Result<u64, PageError> {
        let total = self.total_elements()?;
        Ok(total.div_ceil(self.request.size()))
    }

    /// The request for the following page, or `None` on the last page.
    #[must_use]
    pub fn next_page_request(&self) -> Option<PageRequest> {
        if !self.has_next {
            return None;
        }

        self.request.next().ok()
    }

    /// The request for the preceding page, or `None` on page 1.
    #[must_use]
    pub fn previous_page_request(&self) -> Option<PageRequest> {
        self.request.previous().ok().flatten()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

///
/// CursoredPage
///
/// Keyset-mode result page. Each row carries its own cursor (the row's
/// sort-key values, in sort-criterion order); the page's next/previous
/// requests wrap the last/first row's cursor.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CursoredPage<T> {
    content: Vec<T>,
    cursors: Vec<Cursor>,
    request: PageRequest,
    total_elements: Option<u64>,
    has_next: bool,
    has_previous: bool,
}

impl<T> CursoredPage<T> {
    /// Build a cursored page; the cursor list must align with the content
    /// one-to-one.
    pub fn new(
        content: Vec<T>,
        cursors: Vec<Cursor>,
        request: PageRequest,
        total_elements: Option<u64>,
        has_next: bool,
        has_previous: bool,
    ) -> Result<Self, PageError> {
        if content.len() != cursors.len() {
            return Err(PageError::CursorCountMismatch {
                content: content.len(),
                cursors: cursors.len(),
            });
        }

        Ok(Self {
            content,
            cursors,
            request,
            total_elements,
            has_next,
            has_previous,
        })
    }

    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[must_use]
    pub const fn request(&self) -> &PageRequest {
        &self.request
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.has_previous
    }

    /// The keyset cursor of the row at `index`.
    #[must_use]
    pub fn cursor(&self, index: usize) -> Option<&Cursor> {
        self.cursors.get(index)
    }

    /// Total number of matching elements across all pages.
    ///
    /// Fails when the originating request opted out of totals.
    pub fn total_elements(&self) -> Result<u64, PageError> {
        self.total_elements.ok_or(PageError::TotalsNotRequested)
    }

    /// The request for the page after this one, anchored at the last row's
    /// cursor. Size, sorts, and the totals flag carry over.
    pub fn next_page_request(&self) -> Result<PageRequest, PageError> {
        if !self.has_next {
            return Err(PageError::NoNextPage);
        }
        let last = self.cursors.last().ok_or(PageError::NoNextPage)?;

        Ok(self.request.after_cursor(last.clone()))
    }

    /// The request for the page before this one, anchored at the first row's
    /// cursor. Size, sorts, and the totals flag carry over.
    pub fn previous_page_request(&self) -> Result<PageRequest, PageError> {
        if !self.has_previous {
            return Err(PageError::NoPreviousPage);
        }
        let first = self.cursors.first().ok_or(PageError::NoPreviousPage)?;

        Ok(self.request.before_cursor(first.clone()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }
}

impl<'a, T> IntoIterator for &'a CursoredPage<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}

impl<T> IntoIterator for CursoredPage<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}
