use crate::{
    eval::eval_restriction,
    ordering::{compare_to_boundary, keyset_of, sort_records},
    provider::{ProviderError, QueryProvider},
    record::Record,
};
use frostdata_core::{
    page::{Cursor, CursoredPage, Mode, Page, PageError, PageRequest},
    restriction::Restriction,
    sort::Sort,
};
use std::cmp::Ordering;

///
/// MemoryProvider
///
/// Reference provider backed by an in-memory row set. It exists to validate
/// the conformance suite against known-good semantics: filter, order,
/// window, wrap.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryProvider {
    rows: Vec<Record>,
}

impl MemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rows(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    pub fn insert(&mut self, record: Record) {
        self.rows.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn matching(&self, restriction: &Restriction) -> Vec<Record> {
        self.rows
            .iter()
            .filter(|row| eval_restriction(row, restriction))
            .cloned()
            .collect()
    }
}

// One materialized page window plus its adjacency flags.
struct Window {
    rows: Vec<Record>,
    has_next: bool,
    has_previous: bool,
}

fn offset_window(matched: Vec<Record>, start: usize, size: usize) -> Window {
    let total = matched.len();
    let end = start.saturating_add(size).min(total);
    let rows = if start >= total {
        Vec::new()
    } else {
        matched[start..end].to_vec()
    };

    Window {
        rows,
        has_next: end < total,
        has_previous: start > 0,
    }
}

fn cursor_next_window(
    matched: &[Record],
    sorts: &[Sort],
    cursor: &Cursor,
    size: usize,
) -> Window {
    let after: Vec<Record> = matched
        .iter()
        .filter(|row| compare_to_boundary(row, sorts, cursor) == Ordering::Greater)
        .cloned()
        .collect();

    Window {
        has_next: after.len() > size,
        has_previous: after.len() < matched.len(),
        rows: after.into_iter().take(size).collect(),
    }
}

fn cursor_previous_window(
    matched: &[Record],
    sorts: &[Sort],
    cursor: &Cursor,
    size: usize,
) -> Window {
    let before: Vec<Record> = matched
        .iter()
        .filter(|row| compare_to_boundary(row, sorts, cursor) == Ordering::Less)
        .cloned()
        .collect();

    let skip = before.len().saturating_sub(size);
    Window {
        has_next: before.len() < matched.len(),
        has_previous: skip > 0,
        rows: before.into_iter().skip(skip).collect(),
    }
}

fn validate_cursor_arity(sorts: &[Sort], cursor: &Cursor) -> Result<(), ProviderError> {
    if cursor.size() != sorts.len() {
        return Err(ProviderError::CursorArityMismatch {
            expected: sorts.len(),
            found: cursor.size(),
        });
    }

    Ok(())
}

impl QueryProvider for MemoryProvider {
    fn select(
        &self,
        restriction: &Restriction,
        request: &PageRequest,
    ) -> Result<CursoredPage<Record>, ProviderError> {
        let sorts = request.sorts();
        if sorts.is_empty() {
            return Err(ProviderError::MissingSort);
        }

        let mut matched = self.matching(restriction);
        sort_records(&mut matched, sorts);

        let total = request
            .requests_total()
            .then(|| matched.len() as u64);
        let size = usize::try_from(request.size()).unwrap_or(usize::MAX);

        let window = match request.mode() {
            Mode::Offset => {
                let start =
                    usize::try_from(request.offset().unwrap_or(0)).unwrap_or(usize::MAX);
                offset_window(matched, start, size)
            }
            Mode::CursorNext => {
                let cursor = request
                    .cursor()
                    .expect("cursor-mode request carries a cursor by construction");
                validate_cursor_arity(sorts, cursor)?;
                cursor_next_window(&matched, sorts, cursor, size)
            }
            Mode::CursorPrevious => {
                let cursor = request
                    .cursor()
                    .expect("cursor-mode request carries a cursor by construction");
                validate_cursor_arity(sorts, cursor)?;
                cursor_previous_window(&matched, sorts, cursor, size)
            }
        };

        let cursors = window
            .rows
            .iter()
            .map(|row| keyset_of(row, sorts))
            .collect::<Result<Vec<_>, PageError>>()?;

        CursoredPage::new(
            window.rows,
            cursors,
            request.clone(),
            total,
            window.has_next,
            window.has_previous,
        )
        .map_err(Into::into)
    }

    fn select_page(
        &self,
        restriction: &Restriction,
        request: &PageRequest,
    ) -> Result<Page<Record>, ProviderError> {
        let Some(offset) = request.offset() else {
            return Err(ProviderError::Page(PageError::CursorTraversal));
        };

        let mut matched = self.matching(restriction);
        sort_records(&mut matched, request.sorts());

        let total = request
            .requests_total()
            .then(|| matched.len() as u64);
        let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        let window = offset_window(matched, start, size);

        Ok(Page::new(
            window.rows,
            request.clone(),
            total,
            window.has_next,
        ))
    }

    fn count(&self, restriction: &Restriction) -> u64 {
        self.matching(restriction).len() as u64
    }
}
