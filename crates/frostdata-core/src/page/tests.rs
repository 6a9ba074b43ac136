use crate::{
    expression::AttributeRef,
    page::{Cursor, CursoredPage, Mode, Page, PageError, PageRequest},
    sort::Sort,
    value::Value,
};
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

fn attr(name: &str) -> AttributeRef {
    AttributeRef::new(name).unwrap()
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn offset_constructors_validate_bounds() {
    assert_eq!(PageRequest::of_page(0).unwrap_err(), PageError::ZeroPage);
    assert_eq!(PageRequest::of_size(0).unwrap_err(), PageError::ZeroSize);

    let request = PageRequest::of_page(3).unwrap().with_size(20).unwrap();
    assert_eq!(request.mode(), Mode::Offset);
    assert_eq!(request.page(), Some(3));
    assert_eq!(request.size(), 20);
    assert_eq!(request.offset(), Some(40));
    assert!(request.cursor().is_none());
    assert!(request.requests_total());
}

#[test]
fn next_increments_offset_pages() {
    let request = PageRequest::of_page(1).unwrap().with_size(7).unwrap();
    let next = request.next().unwrap();

    assert_eq!(next.page(), Some(2));
    assert_eq!(next.size(), 7);
    assert_eq!(next.mode(), Mode::Offset);

    // the original is untouched
    assert_eq!(request.page(), Some(1));
}

#[test]
fn previous_stops_at_page_one() {
    let request = PageRequest::of_page(2).unwrap();
    assert_eq!(request.previous().unwrap().unwrap().page(), Some(1));

    let first = PageRequest::of_page(1).unwrap();
    assert!(first.previous().unwrap().is_none());
}

#[test]
fn keyset_entry_points_switch_modes() {
    let request = PageRequest::of_size(5).unwrap();

    let after = request.after_keyset(vec![Value::Int(42)]).unwrap();
    assert_eq!(after.mode(), Mode::CursorNext);
    assert_eq!(after.cursor().unwrap().elements(), &[Value::Int(42)]);
    assert!(after.page().is_none());

    let before = request
        .before_keyset(vec![Value::Int(42), Value::Text("x".into())])
        .unwrap();
    assert_eq!(before.mode(), Mode::CursorPrevious);
    assert_eq!(before.cursor().unwrap().size(), 2);

    assert_eq!(
        request.after_keyset(Vec::new()).unwrap_err(),
        PageError::EmptyKeyset
    );
}

#[test]
fn offset_traversal_is_unsupported_in_cursor_mode() {
    let request = PageRequest::of_size(5)
        .unwrap()
        .after_keyset(vec![Value::Int(7)])
        .unwrap();

    assert_eq!(request.next().unwrap_err(), PageError::CursorTraversal);
    assert_eq!(request.previous().unwrap_err(), PageError::CursorTraversal);
}

#[test]
fn cursor_equality_is_elementwise_and_order_sensitive() {
    let a = Cursor::new(vec![Value::Int(1), Value::Text("x".into())]).unwrap();
    let b = Cursor::new(vec![Value::Int(1), Value::Text("x".into())]).unwrap();
    let reordered = Cursor::new(vec![Value::Text("x".into()), Value::Int(1)]).unwrap();

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(a, reordered);
}

#[test]
fn request_equality_follows_cursor_equality() {
    let base = PageRequest::of_size(5)
        .unwrap()
        .sort_by([Sort::desc(attr("id"))]);

    let a = base.after_keyset(vec![Value::Int(9)]).unwrap();
    let b = base.after_keyset(vec![Value::Int(9)]).unwrap();
    let c = base.after_keyset(vec![Value::Int(10)]).unwrap();

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(a, c);

    // same keyset, different traversal direction
    let d = base.before_keyset(vec![Value::Int(9)]).unwrap();
    assert_ne!(a, d);
}

#[test]
fn withers_are_non_mutating() {
    let request = PageRequest::of_size(5).unwrap();
    let sorted = request.sort_by([Sort::desc(attr("id"))]);
    let untotaled = sorted.without_total();

    assert!(request.sorts().is_empty());
    assert_eq!(sorted.sorts().len(), 1);
    assert!(sorted.requests_total());
    assert!(!untotaled.requests_total());
    assert!(untotaled.with_total().requests_total());
}

#[test]
fn page_totals_require_opt_in() {
    let request = PageRequest::of_size(3).unwrap().without_total();
    let page = Page::new(vec![1, 2, 3], request, None, true);

    assert_eq!(page.total_elements().unwrap_err(), PageError::TotalsNotRequested);
    assert_eq!(page.total_pages().unwrap_err(), PageError::TotalsNotRequested);

    let request = PageRequest::of_size(3).unwrap();
    let page = Page::new(vec![1, 2, 3], request, Some(10), true);
    assert_eq!(page.total_elements().unwrap(), 10);
    assert_eq!(page.total_pages().unwrap(), 4);
}

#[test]
fn page_derives_adjacent_offset_requests() {
    let request = PageRequest::of_page(2).unwrap().with_size(3).unwrap();
    let page = Page::new(vec!["a", "b", "c"], request, Some(7), true);

    assert_eq!(page.next_page_request().unwrap().page(), Some(3));
    assert_eq!(page.previous_page_request().unwrap().page(), Some(1));

    let last = Page::new(
        vec!["g"],
        PageRequest::of_page(3).unwrap().with_size(3).unwrap(),
        Some(7),
        false,
    );
    assert!(last.next_page_request().is_none());
}

#[test]
fn cursored_page_requires_aligned_cursors() {
    let request = PageRequest::of_size(2).unwrap();
    let err = CursoredPage::new(
        vec!["a", "b"],
        vec![Cursor::new(vec![Value::Int(1)]).unwrap()],
        request,
        None,
        false,
        false,
    )
    .unwrap_err();

    assert_eq!(
        err,
        PageError::CursorCountMismatch {
            content: 2,
            cursors: 1
        }
    );
}

#[test]
fn cursored_page_anchors_traversal_at_boundary_rows() {
    let request = PageRequest::of_size(2)
        .unwrap()
        .sort_by([Sort::desc(attr("id"))])
        .without_total();

    let first_cursor = Cursor::new(vec![Value::Int(99)]).unwrap();
    let last_cursor = Cursor::new(vec![Value::Int(98)]).unwrap();
    let page = CursoredPage::new(
        vec!["row99", "row98"],
        vec![first_cursor.clone(), last_cursor.clone()],
        request.clone(),
        None,
        true,
        true,
    )
    .unwrap();

    let next = page.next_page_request().unwrap();
    assert_eq!(next.mode(), Mode::CursorNext);
    assert_eq!(next.cursor(), Some(&last_cursor));
    assert_eq!(next.size(), 2);
    assert_eq!(next.sorts(), request.sorts());
    assert!(!next.requests_total());

    let previous = page.previous_page_request().unwrap();
    assert_eq!(previous.mode(), Mode::CursorPrevious);
    assert_eq!(previous.cursor(), Some(&first_cursor));
}

#[test]
fn cursored_page_rejects_traversal_past_the_ends() {
    let request = PageRequest::of_size(2).unwrap();
    let page = CursoredPage::new(
        vec!["only"],
        vec![Cursor::new(vec![Value::Int(1)]).unwrap()],
        request,
        None,
        false,
        false,
    )
    .unwrap();

    assert_eq!(page.next_page_request().unwrap_err(), PageError::NoNextPage);
    assert_eq!(
        page.previous_page_request().unwrap_err(),
        PageError::NoPreviousPage
    );
}

#[test]
fn page_request_serde_round_trips() {
    let request = PageRequest::of_size(5)
        .unwrap()
        .sort_by([Sort::desc(attr("id"))])
        .after_keyset(vec![Value::Int(9)])
        .unwrap();

    let json = serde_json::to_string(&request).unwrap();
    let back: PageRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, request);
}
