use crate::value::Value;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// ExpressionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ExpressionError {
    #[error("attribute name must be non-empty")]
    EmptyAttribute,

    #[error("attribute path '{path}' contains an empty segment")]
    EmptyAttributeSegment { path: String },

    #[error("divisor is a literal {variant} zero")]
    ZeroDivisor { variant: &'static str },
}

///
/// AttributeRef
///
/// Validated reference to an entity attribute. Dot-delimited paths address
/// nested/embedded attributes (`"maker.name"`).
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct AttributeRef(String);

impl AttributeRef {
    pub fn new(name: impl Into<String>) -> Result<Self, ExpressionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ExpressionError::EmptyAttribute);
        }
        if name.split('.').any(str::is_empty) {
            return Err(ExpressionError::EmptyAttributeSegment { path: name });
        }

        Ok(Self(name))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl AsRef<str> for AttributeRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// NumericOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum NumericOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl NumericOp {
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

///
/// NumericExpression
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct NumericExpression {
    pub op: NumericOp,
    pub left: Expression,
    pub right: Expression,
}

///
/// TextExpression
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum TextExpression {
    Upper(Expression),
    Lower(Expression),
    Concat(Vec<Expression>),
}

///
/// Expression
///
/// Reference to an entity attribute, a literal operand, or a computed
/// function/operator over sub-expressions. Purely structural; no evaluation
/// happens in this crate.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Attribute(AttributeRef),
    Literal(Value),
    Numeric(Box<NumericExpression>),
    Text(Box<TextExpression>),
}

impl Expression {
    pub fn attribute(name: impl Into<String>) -> Result<Self, ExpressionError> {
        AttributeRef::new(name).map(Self::Attribute)
    }

    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    fn numeric(op: NumericOp, left: Self, right: Self) -> Self {
        Self::Numeric(Box::new(NumericExpression { op, left, right }))
    }

    #[must_use]
    pub fn plus(self, rhs: impl Into<Self>) -> Self {
        Self::numeric(NumericOp::Add, self, rhs.into())
    }

    #[must_use]
    pub fn minus(self, rhs: impl Into<Self>) -> Self {
        Self::numeric(NumericOp::Subtract, self, rhs.into())
    }

    #[must_use]
    pub fn times(self, rhs: impl Into<Self>) -> Self {
        Self::numeric(NumericOp::Multiply, self, rhs.into())
    }

    /// Build a division expression. A literal zero divisor is rejected at
    /// construction, checked per concrete numeric variant.
    pub fn divided_by(self, rhs: impl Into<Self>) -> Result<Self, ExpressionError> {
        let rhs = rhs.into();
        if let Some(variant) = zero_literal_variant(&rhs) {
            return Err(ExpressionError::ZeroDivisor { variant });
        }

        Ok(Self::numeric(NumericOp::Divide, self, rhs))
    }

    #[must_use]
    pub fn upper(self) -> Self {
        Self::Text(Box::new(TextExpression::Upper(self)))
    }

    #[must_use]
    pub fn lower(self) -> Self {
        Self::Text(Box::new(TextExpression::Lower(self)))
    }

    #[must_use]
    pub fn concat(self, rhs: impl Into<Self>) -> Self {
        Self::Text(Box::new(TextExpression::Concat(vec![self, rhs.into()])))
    }
}

// Detect an exact-zero literal divisor for each numeric variant.
fn zero_literal_variant(expr: &Expression) -> Option<&'static str> {
    let Expression::Literal(value) = expr else {
        return None;
    };

    let zero = match value {
        Value::Int(v) => *v == 0,
        Value::Uint(v) => *v == 0,
        Value::Float32(v) => v.is_zero(),
        Value::Float64(v) => v.is_zero(),
        Value::IntBig(v) => v.is_zero(),
        Value::Decimal(v) => v.is_zero(),
        _ => false,
    };

    zero.then(|| value.variant_name())
}

impl From<AttributeRef> for Expression {
    fn from(attr: AttributeRef) -> Self {
        Self::Attribute(attr)
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<i64> for Expression {
    fn from(v: i64) -> Self {
        Self::Literal(Value::Int(v))
    }
}

impl From<u64> for Expression {
    fn from(v: u64) -> Self {
        Self::Literal(Value::Uint(v))
    }
}

impl From<&str> for Expression {
    fn from(v: &str) -> Self {
        Self::Literal(Value::Text(v.to_string()))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(attr) => write!(f, "{attr}"),
            Self::Literal(value) => write!(f, "{value}"),
            Self::Numeric(num) => {
                write!(f, "({} {} {})", num.left, num.op.symbol(), num.right)
            }
            Self::Text(text) => match text.as_ref() {
                TextExpression::Upper(inner) => write!(f, "UPPER({inner})"),
                TextExpression::Lower(inner) => write!(f, "LOWER({inner})"),
                TextExpression::Concat(parts) => {
                    write!(f, "CONCAT(")?;
                    for (i, part) in parts.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{part}")?;
                    }
                    write!(f, ")")
                }
            },
        }
    }
}

///
/// TESTS
///
