mod builder;


use crate::{constraint::Constraint, expression::Expression};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{BitAnd, BitOr, Not},
};
use thiserror::Error as ThisError;

///
/// RestrictionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RestrictionError {
    #[error("composite restriction requires at least one child restriction")]
    EmptyComposite,
}

///
/// CompositionType
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CompositionType {
    /// Conjunction: every child restriction must hold.
    All,
    /// Disjunction: at least one child restriction must hold.
    Any,
}

impl CompositionType {
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::All => Self::Any,
            Self::Any => Self::All,
        }
    }
}

///
/// BasicRestriction
///
/// One expression paired with one constraint.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct BasicRestriction {
    expression: Expression,
    constraint: Constraint,
}

impl BasicRestriction {
    #[must_use]
    pub fn new(expression: impl Into<Expression>, constraint: Constraint) -> Self {
        Self {
            expression: expression.into(),
            constraint,
        }
    }

    #[must_use]
    pub const fn expression(&self) -> &Expression {
        &self.expression
    }

    #[must_use]
    pub const fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Same expression, negated constraint.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            expression: self.expression.clone(),
            constraint: self.constraint.negate(),
        }
    }
}

///
/// CompositeRestriction
///
/// Ordered child restrictions combined under ALL or ANY, with a negation
/// flag. A set `negated` flag means the complement of the combinator result:
/// consumers must evaluate `negated=true, All` as "not all children hold".
/// The flag form is behaviorally equivalent to the De Morgan expansion
/// (flipped combinator over negated children) without restructuring.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct CompositeRestriction {
    combinator: CompositionType,
    restrictions: Vec<Restriction>,
    negated: bool,
}

impl CompositeRestriction {
    #[must_use]
    pub const fn combinator(&self) -> CompositionType {
        self.combinator
    }

    #[must_use]
    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Empty composites negate by swapping the combinator (the De Morgan
    /// image of an empty child set); non-empty composites toggle the flag.
    #[must_use]
    pub fn negate(&self) -> Self {
        if self.restrictions.is_empty() {
            return Self {
                combinator: self.combinator.flip(),
                restrictions: Vec::new(),
                negated: self.negated,
            };
        }

        Self {
            combinator: self.combinator,
            restrictions: self.restrictions.clone(),
            negated: !self.negated,
        }
    }
}

///
/// Restriction
///
/// A predicate over an entity: one constraint-bound expression, or a logical
/// combination of other restrictions. Fully immutable; composition and
/// negation always allocate.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Restriction {
    Basic(BasicRestriction),
    Composite(CompositeRestriction),
}

impl Restriction {
    #[must_use]
    pub fn basic(expression: impl Into<Expression>, constraint: Constraint) -> Self {
        Self::Basic(BasicRestriction::new(expression, constraint))
    }

    /// Conjunction of child restrictions, preserving input order.
    pub fn all(restrictions: Vec<Self>) -> Result<Self, RestrictionError> {
        Self::composite(CompositionType::All, restrictions)
    }

    /// Disjunction of child restrictions, preserving input order.
    pub fn any(restrictions: Vec<Self>) -> Result<Self, RestrictionError> {
        Self::composite(CompositionType::Any, restrictions)
    }

    fn composite(
        combinator: CompositionType,
        restrictions: Vec<Self>,
    ) -> Result<Self, RestrictionError> {
        if restrictions.is_empty() {
            return Err(RestrictionError::EmptyComposite);
        }

        Ok(Self::Composite(CompositeRestriction {
            combinator,
            restrictions,
            negated: false,
        }))
    }

    /// The always-satisfied restriction: an ALL composite with no children.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self::Composite(CompositeRestriction {
            combinator: CompositionType::All,
            restrictions: Vec::new(),
            negated: false,
        })
    }

    /// The never-satisfied restriction: an ANY composite with no children.
    #[must_use]
    pub const fn unmatchable() -> Self {
        Self::Composite(CompositeRestriction {
            combinator: CompositionType::Any,
            restrictions: Vec::new(),
            negated: false,
        })
    }

    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        *self == Self::unrestricted()
    }

    #[must_use]
    pub fn is_unmatchable(&self) -> bool {
        *self == Self::unmatchable()
    }

    /// Thin convenience over [`Self::negate`].
    #[must_use]
    pub fn not(restriction: &Self) -> Self {
        restriction.negate()
    }

    /// The logical complement. Applying it twice yields a restriction equal
    /// to the original.
    #[must_use]
    pub fn negate(&self) -> Self {
        match self {
            Self::Basic(basic) => Self::Basic(basic.negate()),
            Self::Composite(composite) => Self::Composite(composite.negate()),
        }
    }
}

impl BitAnd for Restriction {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::Composite(CompositeRestriction {
            combinator: CompositionType::All,
            restrictions: vec![self, rhs],
            negated: false,
        })
    }
}

impl BitOr for Restriction {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Composite(CompositeRestriction {
            combinator: CompositionType::Any,
            restrictions: vec![self, rhs],
            negated: false,
        })
    }
}

impl Not for Restriction {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(basic) => {
                write!(f, "{} {}", basic.expression(), basic.constraint())
            }
            Self::Composite(composite) => {
                if composite.is_negated() {
                    write!(f, "NOT ")?;
                }
                if composite.restrictions().is_empty() {
                    return match composite.combinator() {
                        CompositionType::All => write!(f, "TRUE"),
                        CompositionType::Any => write!(f, "FALSE"),
                    };
                }

                let joiner = match composite.combinator() {
                    CompositionType::All => " AND ",
                    CompositionType::Any => " OR ",
                };
                write!(f, "(")?;
                for (i, child) in composite.restrictions().iter().enumerate() {
                    if i > 0 {
                        write!(f, "{joiner}")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
        }
    }
}
