use crate::expression::AttributeRef;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// SortError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SortError {
    #[error("order requires at least one sort criterion")]
    Empty,
}

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum SortDirection {
    #[display("ASC")]
    Asc,
    #[display("DESC")]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

///
/// Sort
///
/// One sort criterion: attribute, direction, case sensitivity.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    attribute: AttributeRef,
    direction: SortDirection,
    ignore_case: bool,
}

impl Sort {
    #[must_use]
    pub const fn of(
        attribute: AttributeRef,
        direction: SortDirection,
        ignore_case: bool,
    ) -> Self {
        Self {
            attribute,
            direction,
            ignore_case,
        }
    }

    #[must_use]
    pub const fn asc(attribute: AttributeRef) -> Self {
        Self::of(attribute, SortDirection::Asc, false)
    }

    #[must_use]
    pub const fn desc(attribute: AttributeRef) -> Self {
        Self::of(attribute, SortDirection::Desc, false)
    }

    #[must_use]
    pub const fn asc_ignore_case(attribute: AttributeRef) -> Self {
        Self::of(attribute, SortDirection::Asc, true)
    }

    #[must_use]
    pub const fn desc_ignore_case(attribute: AttributeRef) -> Self {
        Self::of(attribute, SortDirection::Desc, true)
    }

    #[must_use]
    pub const fn attribute(&self) -> &AttributeRef {
        &self.attribute
    }

    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self.direction, SortDirection::Asc)
    }

    #[must_use]
    pub const fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Same criterion, opposite direction. Used for backward keyset
    /// traversal.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            attribute: self.attribute.clone(),
            direction: self.direction.reverse(),
            ignore_case: self.ignore_case,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.attribute, self.direction)?;
        if self.ignore_case {
            write!(f, " IGNORE CASE")?;
        }

        Ok(())
    }
}

///
/// Order
///
/// Ordered, non-empty sequence of sort criteria. Position is precedence:
/// comparison is lexicographic, falling through to the next criterion on
/// equal values.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Order {
    sorts: Vec<Sort>,
}

impl Order {
    /// Build an order from criteria; at least one is required.
    pub fn by(sorts: Vec<Sort>) -> Result<Self, SortError> {
        if sorts.is_empty() {
            return Err(SortError::Empty);
        }

        Ok(Self { sorts })
    }

    #[must_use]
    pub fn of(sort: Sort) -> Self {
        Self { sorts: vec![sort] }
    }

    /// Append a lower-precedence criterion.
    #[must_use]
    pub fn then(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Combine declared (static) criteria with caller-supplied (dynamic)
    /// ones. Static criteria keep higher precedence; dynamic criteria break
    /// remaining ties in supplied order.
    #[must_use]
    pub fn with_dynamic(mut self, dynamic: impl IntoIterator<Item = Sort>) -> Self {
        self.sorts.extend(dynamic);
        self
    }

    #[must_use]
    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sorts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sort> {
        self.sorts.iter()
    }

    /// Every criterion reversed, preserving precedence. Used for backward
    /// keyset traversal.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            sorts: self.sorts.iter().map(Sort::reversed).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Order {
    type Item = &'a Sort;
    type IntoIter = std::slice::Iter<'a, Sort>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorts.iter()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sort) in self.sorts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{sort}")?;
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::AttributeRef;

    fn attr(name: &str) -> AttributeRef {
        AttributeRef::new(name).unwrap()
    }

    #[test]
    fn constructors_set_direction_and_case() {
        let sort = Sort::desc_ignore_case(attr("title"));
        assert_eq!(sort.direction(), SortDirection::Desc);
        assert!(sort.ignore_case());
        assert!(!sort.is_ascending());

        assert!(Sort::asc(attr("id")).is_ascending());
    }

    #[test]
    fn empty_order_is_rejected() {
        assert_eq!(Order::by(Vec::new()).unwrap_err(), SortError::Empty);
    }

    #[test]
    fn precedence_is_positional() {
        let order = Order::of(Sort::asc(attr("make")))
            .then(Sort::asc(attr("model")))
            .then(Sort::desc(attr("year")));

        let attrs: Vec<_> = order
            .iter()
            .map(|s| s.attribute().name().to_string())
            .collect();
        assert_eq!(attrs, ["make", "model", "year"]);
    }

    #[test]
    fn dynamic_criteria_append_after_static() {
        let order = Order::of(Sort::asc(attr("status")))
            .with_dynamic([Sort::desc(attr("price")), Sort::asc(attr("id"))]);

        let attrs: Vec<_> = order
            .iter()
            .map(|s| s.attribute().name().to_string())
            .collect();
        assert_eq!(attrs, ["status", "price", "id"]);
    }

    #[test]
    fn reversed_flips_every_direction() {
        let order = Order::of(Sort::asc(attr("a"))).then(Sort::desc(attr("b")));
        let reversed = order.reversed();

        assert_eq!(reversed.sorts()[0].direction(), SortDirection::Desc);
        assert_eq!(reversed.sorts()[1].direction(), SortDirection::Asc);
        assert_eq!(reversed.reversed(), order);
    }

    #[test]
    fn display_renders_sql_style() {
        let order = Order::of(Sort::desc(attr("id")))
            .then(Sort::asc_ignore_case(attr("name")));
        assert_eq!(order.to_string(), "id DESC, name ASC IGNORE CASE");
    }
}
