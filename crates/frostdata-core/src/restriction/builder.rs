//! Attribute-bound restriction builders.
//!
//! These keep call sites declarative: `attr.gt(100)` instead of spelling out
//! the expression/constraint pairing by hand.

use crate::{
    constraint::{Constraint, ConstraintError},
    expression::AttributeRef,
    pattern::LikePattern,
    restriction::Restriction,
    value::Value,
};

impl AttributeRef {
    fn restrict(&self, constraint: Constraint) -> Restriction {
        Restriction::basic(self.clone(), constraint)
    }

    // ------------------------------------------------------------------
    // Comparison restrictions
    // ------------------------------------------------------------------

    #[must_use]
    pub fn eq(&self, value: impl Into<Value>) -> Restriction {
        self.restrict(Constraint::equal_to(value))
    }

    #[must_use]
    pub fn ne(&self, value: impl Into<Value>) -> Restriction {
        self.restrict(Constraint::not_equal_to(value))
    }

    #[must_use]
    pub fn gt(&self, value: impl Into<Value>) -> Restriction {
        self.restrict(Constraint::greater_than(value))
    }

    #[must_use]
    pub fn gte(&self, value: impl Into<Value>) -> Restriction {
        self.restrict(Constraint::greater_than_or_equal(value))
    }

    #[must_use]
    pub fn lt(&self, value: impl Into<Value>) -> Restriction {
        self.restrict(Constraint::less_than(value))
    }

    #[must_use]
    pub fn lte(&self, value: impl Into<Value>) -> Restriction {
        self.restrict(Constraint::less_than_or_equal(value))
    }

    #[must_use]
    pub fn between(&self, lower: impl Into<Value>, upper: impl Into<Value>) -> Restriction {
        self.restrict(Constraint::between(lower, upper))
    }

    #[must_use]
    pub fn not_between(&self, lower: impl Into<Value>, upper: impl Into<Value>) -> Restriction {
        self.restrict(Constraint::not_between(lower, upper))
    }

    /// Membership test against a fixed list.
    pub fn in_values<I, V>(&self, values: I) -> Result<Restriction, ConstraintError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Constraint::in_values(values).map(|c| self.restrict(c))
    }

    /// Negated membership test against a fixed list.
    pub fn not_in_values<I, V>(&self, values: I) -> Result<Restriction, ConstraintError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Constraint::not_in_values(values).map(|c| self.restrict(c))
    }

    // ------------------------------------------------------------------
    // Nullability restrictions
    // ------------------------------------------------------------------

    #[must_use]
    pub fn is_null(&self) -> Restriction {
        self.restrict(Constraint::null())
    }

    #[must_use]
    pub fn not_null(&self) -> Restriction {
        self.restrict(Constraint::not_null())
    }

    // ------------------------------------------------------------------
    // Text pattern restrictions
    // ------------------------------------------------------------------

    #[must_use]
    pub fn like(&self, pattern: LikePattern) -> Restriction {
        self.restrict(Constraint::like(pattern))
    }

    #[must_use]
    pub fn not_like(&self, pattern: LikePattern) -> Restriction {
        self.restrict(Constraint::not_like(pattern))
    }

    /// Values containing the literal substring.
    #[must_use]
    pub fn contains(&self, text: impl Into<String>) -> Restriction {
        self.like(LikePattern::substring(text))
    }

    /// Values not containing the literal substring.
    #[must_use]
    pub fn not_contains(&self, text: impl Into<String>) -> Restriction {
        self.not_like(LikePattern::substring(text))
    }

    /// Case-insensitive form of [`Self::contains`].
    #[must_use]
    pub fn contains_ignore_case(&self, text: impl Into<String>) -> Restriction {
        self.like(LikePattern::substring(text).ignore_case())
    }

    /// Values starting with the literal prefix.
    #[must_use]
    pub fn starts_with(&self, text: impl Into<String>) -> Restriction {
        self.like(LikePattern::prefix(text))
    }

    /// Values ending with the literal suffix.
    #[must_use]
    pub fn ends_with(&self, text: impl Into<String>) -> Restriction {
        self.like(LikePattern::suffix(text))
    }
}
