#[cfg(test)]
mod tests;

use crate::{pattern::LikePattern, value::Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// ConstraintError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConstraintError {
    #[error("membership constraint requires at least one value")]
    NoElements,

    #[error("membership constraint value at index {index} must be non-null")]
    NullElement { index: usize },
}

///
/// Constraint
///
/// A predicate over a single value: comparison, range, membership,
/// nullability, or text pattern. Every variant knows its own exact logical
/// complement; negation allocates a new value and never mutates.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    EqualTo(Value),
    NotEqualTo(Value),
    GreaterThan(Value),
    GreaterThanOrEqual(Value),
    LessThan(Value),
    LessThanOrEqual(Value),
    Between { lower: Value, upper: Value },
    NotBetween { lower: Value, upper: Value },
    In(Vec<Value>),
    NotIn(Vec<Value>),
    Null,
    NotNull,
    Like(LikePattern),
    NotLike(LikePattern),
}

impl Constraint {
    #[must_use]
    pub fn equal_to(value: impl Into<Value>) -> Self {
        Self::EqualTo(value.into())
    }

    #[must_use]
    pub fn not_equal_to(value: impl Into<Value>) -> Self {
        Self::NotEqualTo(value.into())
    }

    #[must_use]
    pub fn greater_than(value: impl Into<Value>) -> Self {
        Self::GreaterThan(value.into())
    }

    #[must_use]
    pub fn greater_than_or_equal(value: impl Into<Value>) -> Self {
        Self::GreaterThanOrEqual(value.into())
    }

    #[must_use]
    pub fn less_than(value: impl Into<Value>) -> Self {
        Self::LessThan(value.into())
    }

    #[must_use]
    pub fn less_than_or_equal(value: impl Into<Value>) -> Self {
        Self::LessThanOrEqual(value.into())
    }

    #[must_use]
    pub fn between(lower: impl Into<Value>, upper: impl Into<Value>) -> Self {
        Self::Between {
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    #[must_use]
    pub fn not_between(lower: impl Into<Value>, upper: impl Into<Value>) -> Self {
        Self::NotBetween {
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    /// Membership constraint. The value list must be non-empty and contain
    /// no null elements.
    pub fn in_values<I, V>(values: I) -> Result<Self, ConstraintError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        membership_values(values).map(Self::In)
    }

    /// Negated membership constraint; same element rules as [`Self::in_values`].
    pub fn not_in_values<I, V>(values: I) -> Result<Self, ConstraintError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        membership_values(values).map(Self::NotIn)
    }

    #[must_use]
    pub const fn null() -> Self {
        Self::Null
    }

    #[must_use]
    pub const fn not_null() -> Self {
        Self::NotNull
    }

    #[must_use]
    pub const fn like(pattern: LikePattern) -> Self {
        Self::Like(pattern)
    }

    #[must_use]
    pub const fn not_like(pattern: LikePattern) -> Self {
        Self::NotLike(pattern)
    }

    /// The exact logical complement of this constraint.
    ///
    /// Total over variants; applying it twice returns a value equal to the
    /// original.
    #[must_use]
    pub fn negate(&self) -> Self {
        match self {
            Self::EqualTo(v) => Self::NotEqualTo(v.clone()),
            Self::NotEqualTo(v) => Self::EqualTo(v.clone()),
            Self::GreaterThan(v) => Self::LessThanOrEqual(v.clone()),
            Self::GreaterThanOrEqual(v) => Self::LessThan(v.clone()),
            Self::LessThan(v) => Self::GreaterThanOrEqual(v.clone()),
            Self::LessThanOrEqual(v) => Self::GreaterThan(v.clone()),
            Self::Between { lower, upper } => Self::NotBetween {
                lower: lower.clone(),
                upper: upper.clone(),
            },
            Self::NotBetween { lower, upper } => Self::Between {
                lower: lower.clone(),
                upper: upper.clone(),
            },
            Self::In(vs) => Self::NotIn(vs.clone()),
            Self::NotIn(vs) => Self::In(vs.clone()),
            Self::Null => Self::NotNull,
            Self::NotNull => Self::Null,
            Self::Like(p) => Self::NotLike(p.clone()),
            Self::NotLike(p) => Self::Like(p.clone()),
        }
    }
}

fn membership_values<I, V>(values: I) -> Result<Vec<Value>, ConstraintError>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        return Err(ConstraintError::NoElements);
    }
    if let Some(index) = values.iter().position(Value::is_null) {
        return Err(ConstraintError::NullElement { index });
    }

    Ok(values)
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EqualTo(v) => write!(f, "= {v}"),
            Self::NotEqualTo(v) => write!(f, "<> {v}"),
            Self::GreaterThan(v) => write!(f, "> {v}"),
            Self::GreaterThanOrEqual(v) => write!(f, ">= {v}"),
            Self::LessThan(v) => write!(f, "< {v}"),
            Self::LessThanOrEqual(v) => write!(f, "<= {v}"),
            Self::Between { lower, upper } => write!(f, "BETWEEN {lower} AND {upper}"),
            Self::NotBetween { lower, upper } => {
                write!(f, "NOT BETWEEN {lower} AND {upper}")
            }
            Self::In(vs) => write!(f, "IN {}", Value::List(vs.clone())),
            Self::NotIn(vs) => write!(f, "NOT IN {}", Value::List(vs.clone())),
            Self::Null => write!(f, "IS NULL"),
            Self::NotNull => write!(f, "IS NOT NULL"),
            Self::Like(p) => write!(f, "LIKE {p}"),
            Self::NotLike(p) => write!(f, "NOT LIKE {p}"),
        }
    }
}
