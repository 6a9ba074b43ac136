//! Lexicographic record ordering and keyset boundary comparison.
//!
//! The same comparator drives sorting, cursor extraction, and boundary
//! filtering, so traversal and ordering can never drift apart.

use crate::record::Record;
use frostdata_core::{
    page::{Cursor, PageError},
    sort::{Sort, SortDirection},
    value::{Value, canonical_cmp},
};
use std::cmp::Ordering;

/// The comparison key one sort criterion sees for a record.
///
/// Missing fields collapse to null (ranking lowest in ascending order);
/// case-insensitive text criteria fold to lowercase.
#[must_use]
pub fn sort_key(record: &Record, sort: &Sort) -> Value {
    let value = record.field(sort.attribute().name()).into_value();
    if sort.ignore_case() {
        if let Value::Text(text) = &value {
            return Value::Text(text.to_lowercase());
        }
    }

    value
}

const fn apply_direction(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Compare two records under the active order: first non-equal criterion
/// wins.
#[must_use]
pub fn compare_records(left: &Record, right: &Record, sorts: &[Sort]) -> Ordering {
    for sort in sorts {
        let ordering = apply_direction(
            canonical_cmp(&sort_key(left, sort), &sort_key(right, sort)),
            sort.direction(),
        );
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

/// Sort records in place under the active order.
pub fn sort_records(records: &mut [Record], sorts: &[Sort]) {
    records.sort_by(|left, right| compare_records(left, right, sorts));
}

/// Extract a row's keyset cursor: its comparison keys in criterion order.
pub fn keyset_of(record: &Record, sorts: &[Sort]) -> Result<Cursor, PageError> {
    Cursor::new(sorts.iter().map(|sort| sort_key(record, sort)).collect())
}

/// Compare a record against a cursor boundary under the active order.
///
/// `Greater` means the row lies strictly after the boundary position.
#[must_use]
pub fn compare_to_boundary(record: &Record, sorts: &[Sort], cursor: &Cursor) -> Ordering {
    for (sort, element) in sorts.iter().zip(cursor.elements()) {
        let ordering = apply_direction(
            canonical_cmp(&sort_key(record, sort), element),
            sort.direction(),
        );
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use frostdata_core::expression::AttributeRef;

    fn attr(name: &str) -> AttributeRef {
        AttributeRef::new(name).unwrap()
    }

    fn row(id: i64, name: &str) -> Record {
        Record::new().with("id", id).with("name", name)
    }

    #[test]
    fn comparison_is_lexicographic_across_criteria() {
        let sorts = [Sort::asc(attr("name")), Sort::desc(attr("id"))];

        let a = row(1, "alpha");
        let b = row(2, "alpha");
        let c = row(3, "beta");

        // equal names fall through to descending id
        assert_eq!(compare_records(&a, &b, &sorts), Ordering::Greater);
        assert_eq!(compare_records(&a, &c, &sorts), Ordering::Less);
    }

    #[test]
    fn missing_fields_sort_lowest_ascending() {
        let sorts = [Sort::asc(attr("name"))];
        let present = row(1, "alpha");
        let absent = Record::new().with("id", 2i64);

        assert_eq!(compare_records(&absent, &present, &sorts), Ordering::Less);
    }

    #[test]
    fn ignore_case_folds_text_keys() {
        let sorts = [Sort::asc_ignore_case(attr("name"))];
        let upper = row(1, "ALPHA");
        let lower = row(2, "alpha");

        assert_eq!(compare_records(&upper, &lower, &sorts), Ordering::Equal);
        assert_eq!(
            sort_key(&upper, &sorts[0]),
            Value::Text("alpha".to_string())
        );
    }

    #[test]
    fn keyset_matches_sort_criteria_order() {
        let sorts = [Sort::desc(attr("id")), Sort::asc(attr("name"))];
        let record = row(9, "alpha");

        let cursor = keyset_of(&record, &sorts).unwrap();
        assert_eq!(
            cursor.elements(),
            &[Value::Int(9), Value::Text("alpha".to_string())]
        );
    }

    #[test]
    fn boundary_comparison_respects_direction() {
        let sorts = [Sort::desc(attr("id"))];
        let cursor = keyset_of(&row(50, "x"), &sorts).unwrap();

        // descending: smaller ids come after the boundary
        assert_eq!(
            compare_to_boundary(&row(49, "x"), &sorts, &cursor),
            Ordering::Greater
        );
        assert_eq!(
            compare_to_boundary(&row(51, "x"), &sorts, &cursor),
            Ordering::Less
        );
        assert_eq!(
            compare_to_boundary(&row(50, "x"), &sorts, &cursor),
            Ordering::Equal
        );
    }
}
