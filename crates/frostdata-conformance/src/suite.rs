//! Executable conformance checks.
//!
//! Each check exercises a provider under test against the standard dataset
//! and the contracts of the core model: offset traversal, bidirectional
//! keyset traversal, totals opt-in/opt-out, cursor arity validation, and
//! restriction semantics.

use crate::{
    provider::{ProviderError, QueryProvider},
    record::Record,
};
use frostdata_core::{
    expression::AttributeRef,
    page::{CursoredPage, PageError, PageRequest},
    restriction::Restriction,
    sort::Sort,
    value::Value,
};
use thiserror::Error as ThisError;

///
/// ConformanceError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConformanceError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("page error: {0}")]
    Page(#[from] PageError),

    #[error("conformance check failed: {0}")]
    Failed(String),
}

fn ensure(condition: bool, message: impl Into<String>) -> Result<(), ConformanceError> {
    if condition {
        Ok(())
    } else {
        Err(ConformanceError::Failed(message.into()))
    }
}

fn attr(name: &'static str) -> AttributeRef {
    AttributeRef::new(name).expect("static attribute names are valid")
}

/// The dataset every check assumes. Providers under test must be seeded with
/// exactly these rows.
#[must_use]
pub fn standard_dataset() -> Vec<Record> {
    const MAKES: [&str; 4] = ["Aurora", "Borealis", "Cirrus", "Drift"];

    (1..=100i64)
        .map(|id| {
            Record::new()
                .with("id", id)
                .with("make", MAKES[(id as usize - 1) % MAKES.len()])
                .with("model", format!("Model {id:03}"))
                .with("year", 1990 + (id as u64 % 30))
                .with("price", id * 350)
        })
        .collect()
}

/// Run every conformance check in sequence.
pub fn run_all(provider: &impl QueryProvider) -> Result<(), ConformanceError> {
    verify_offset_traversal(provider)?;
    verify_keyset_forward_traversal(provider)?;
    verify_keyset_backward_traversal(provider)?;
    verify_totals_opt_out(provider)?;
    verify_cursor_arity_rejection(provider)?;
    verify_restriction_semantics(provider)?;
    verify_negation_equivalence(provider)?;

    Ok(())
}

fn record_id(record: &Record) -> i64 {
    match record.value("id") {
        Some(Value::Int(id)) => *id,
        _ => i64::MIN,
    }
}

fn page_ids(page: &CursoredPage<Record>) -> Vec<i64> {
    page.iter().map(record_id).collect()
}

/// Offset pagination visits every row once, in order, ten pages of ten.
pub fn verify_offset_traversal(provider: &impl QueryProvider) -> Result<(), ConformanceError> {
    let mut request = PageRequest::of_size(10)?.sort_by([Sort::asc(attr("id"))]);
    let mut ids = Vec::new();
    let mut pages = 0u64;

    loop {
        let page = provider.select_page(&Restriction::unrestricted(), &request)?;
        ids.extend(page.iter().map(record_id));
        pages += 1;

        match page.next_page_request() {
            Some(next) => request = next,
            None => break,
        }
    }

    ensure(pages == 10, format!("expected 10 offset pages, saw {pages}"))?;
    let expected: Vec<i64> = (1..=100).collect();
    ensure(
        ids == expected,
        "offset traversal must visit ids 1..=100 in ascending order",
    )
}

// Walk forward through the whole dataset in descending id order, size 7.
fn walk_forward(
    provider: &impl QueryProvider,
) -> Result<(Vec<i64>, CursoredPage<Record>), ConformanceError> {
    let request = PageRequest::of_size(7)?
        .sort_by([Sort::desc(attr("id"))])
        .without_total();

    let mut page = provider.select(&Restriction::unrestricted(), &request)?;
    let mut ids = page_ids(&page);

    while page.has_next() {
        let next = page.next_page_request()?;
        page = provider.select(&Restriction::unrestricted(), &next)?;
        ensure(
            page.len() <= 7,
            format!("page exceeds requested size: {} rows", page.len()),
        )?;
        ids.extend(page_ids(&page));
    }

    Ok((ids, page))
}

/// Keyset forward traversal: every row exactly once, descending, short final
/// page.
pub fn verify_keyset_forward_traversal(
    provider: &impl QueryProvider,
) -> Result<(), ConformanceError> {
    let (ids, final_page) = walk_forward(provider)?;

    let expected: Vec<i64> = (1..=100).rev().collect();
    ensure(
        ids == expected,
        "keyset traversal must visit ids 100..=1 in descending order with no duplicates or skips",
    )?;
    ensure(
        final_page.len() == 2,
        format!("final page must hold the 2 leftover rows, saw {}", final_page.len()),
    )
}

/// Keyset backward traversal retraces the forward pages exactly.
pub fn verify_keyset_backward_traversal(
    provider: &impl QueryProvider,
) -> Result<(), ConformanceError> {
    let (forward_ids, mut page) = walk_forward(provider)?;

    let mut backward_ids = page_ids(&page);
    while page.has_previous() {
        let previous = page.previous_page_request()?;
        page = provider.select(&Restriction::unrestricted(), &previous)?;
        ensure(
            page.len() <= 7,
            format!("page exceeds requested size: {} rows", page.len()),
        )?;

        let mut ids = page_ids(&page);
        ids.extend(backward_ids);
        backward_ids = ids;
    }

    ensure(
        backward_ids == forward_ids,
        "backward keyset traversal must retrace the forward pages",
    )
}

/// Totals are present when requested and an error when opted out.
pub fn verify_totals_opt_out(provider: &impl QueryProvider) -> Result<(), ConformanceError> {
    let request = PageRequest::of_size(10)?.sort_by([Sort::asc(attr("id"))]);

    let page = provider.select_page(&Restriction::unrestricted(), &request)?;
    ensure(
        page.total_elements()? == 100,
        "requested totals must report 100 elements",
    )?;
    ensure(page.total_pages()? == 10, "requested totals must report 10 pages")?;

    let page = provider.select_page(&Restriction::unrestricted(), &request.without_total())?;
    ensure(
        page.total_elements() == Err(PageError::TotalsNotRequested),
        "totals on an opted-out page must fail with TotalsNotRequested",
    )?;

    let cursored = provider.select(&Restriction::unrestricted(), &request.without_total())?;
    ensure(
        cursored.total_elements() == Err(PageError::TotalsNotRequested),
        "totals on an opted-out cursored page must fail with TotalsNotRequested",
    )
}

/// A cursor misaligned with the sort criteria is rejected.
pub fn verify_cursor_arity_rejection(
    provider: &impl QueryProvider,
) -> Result<(), ConformanceError> {
    let request = PageRequest::of_size(5)?
        .sort_by([Sort::desc(attr("id"))])
        .after_keyset(vec![Value::Int(50), Value::Text("x".into())])?;

    match provider.select(&Restriction::unrestricted(), &request) {
        Err(ProviderError::CursorArityMismatch {
            expected: 1,
            found: 2,
        }) => Ok(()),
        Err(other) => Err(ConformanceError::Failed(format!(
            "expected a cursor arity mismatch, saw error: {other}"
        ))),
        Ok(_) => Err(ConformanceError::Failed(
            "expected a cursor arity mismatch, query succeeded".into(),
        )),
    }
}

/// Restriction evaluation over the standard dataset matches the algebra.
pub fn verify_restriction_semantics(
    provider: &impl QueryProvider,
) -> Result<(), ConformanceError> {
    let cases: Vec<(Restriction, u64, &str)> = vec![
        (Restriction::unrestricted(), 100, "unrestricted"),
        (Restriction::unmatchable(), 0, "unmatchable"),
        (attr("id").between(10i64, 20i64), 11, "between 10 and 20"),
        (attr("make").eq("Borealis"), 25, "make = Borealis"),
        (attr("make").contains("real"), 25, "make contains 'real'"),
        (attr("make").starts_with("Au"), 25, "make starts with 'Au'"),
        (attr("make").ends_with("rift"), 25, "make ends with 'rift'"),
        (
            attr("make").contains_ignore_case("AURORA"),
            25,
            "make contains 'AURORA' ignoring case",
        ),
        (
            attr("make").eq("Aurora") & attr("id").lte(50i64),
            13,
            "make = Aurora and id <= 50",
        ),
        (
            attr("id").eq(1i64) | attr("id").eq(100i64),
            2,
            "id = 1 or id = 100",
        ),
        (
            attr("id")
                .in_values([1i64, 2, 3])
                .map_err(|err| ConformanceError::Failed(err.to_string()))?,
            3,
            "id in (1, 2, 3)",
        ),
        (attr("price").is_null(), 0, "price is null"),
        (attr("price").not_null(), 100, "price is not null"),
    ];

    for (restriction, expected, label) in cases {
        let count = provider.count(&restriction);
        ensure(
            count == expected,
            format!("{label}: expected {expected} rows, saw {count}"),
        )?;
    }

    Ok(())
}

// Collect matching ids in ascending id order, one oversized page.
fn select_ids(
    provider: &impl QueryProvider,
    restriction: &Restriction,
) -> Result<Vec<i64>, ConformanceError> {
    let request = PageRequest::of_size(200)?.sort_by([Sort::asc(attr("id"))]);
    let page = provider.select_page(restriction, &request)?;

    Ok(page.iter().map(record_id).collect())
}

/// Negation is the exact complement, and the flag representation evaluates
/// like its structural De Morgan expansion.
pub fn verify_negation_equivalence(
    provider: &impl QueryProvider,
) -> Result<(), ConformanceError> {
    let samples = [
        attr("id").between(10i64, 20i64),
        attr("make").contains("real"),
        attr("make").eq("Aurora") & attr("id").lte(50i64),
        attr("id").lt(5i64) | attr("year").gte(2010u64),
    ];

    for restriction in samples {
        let matched = provider.count(&restriction);
        let complement = provider.count(&restriction.negate());
        ensure(
            matched + complement == 100,
            format!(
                "negation must partition the dataset: {matched} + {complement} != 100 for {restriction}"
            ),
        )?;
    }

    // flag form vs structural De Morgan expansion
    let a = attr("make").eq("Aurora");
    let b = attr("id").lte(50i64);

    let flagged = (a.clone() & b.clone()).negate();
    let expanded = a.negate() | b.negate();
    ensure(
        select_ids(provider, &flagged)? == select_ids(provider, &expanded)?,
        "negated ALL must match ANY over negated children",
    )?;

    let flagged = (a.clone() | b.clone()).negate();
    let expanded = a.negate() & b.negate();
    ensure(
        select_ids(provider, &flagged)? == select_ids(provider, &expanded)?,
        "negated ANY must match ALL over negated children",
    )?;

    // duality of the sentinels
    ensure(
        provider.count(&Restriction::unrestricted().negate()) == 0,
        "negated unrestricted must match nothing",
    )?;
    ensure(
        provider.count(&Restriction::unmatchable().negate()) == 100,
        "negated unmatchable must match everything",
    )
}
