//! Reference restriction evaluation over dynamic records.
//!
//! Negative constraint variants evaluate as the exact complement of their
//! positive kernels, so the negation table and the evaluator can never
//! disagree.

use crate::record::Record;
use frostdata_core::{
    constraint::Constraint,
    expression::{Expression, NumericExpression, NumericOp, TextExpression},
    pattern::LikePattern,
    restriction::{CompositionType, Restriction},
    value::{Float32, Float64, Value, canonical_cmp},
};
use num_traits::Zero;
use std::cmp::Ordering;

/// Evaluate a restriction against one record.
#[must_use]
pub fn eval_restriction(record: &Record, restriction: &Restriction) -> bool {
    match restriction {
        Restriction::Basic(basic) => {
            let value = eval_expression(record, basic.expression());
            eval_constraint(&value, basic.constraint())
        }
        Restriction::Composite(composite) => {
            let result = match composite.combinator() {
                CompositionType::All => composite
                    .restrictions()
                    .iter()
                    .all(|child| eval_restriction(record, child)),
                CompositionType::Any => composite
                    .restrictions()
                    .iter()
                    .any(|child| eval_restriction(record, child)),
            };

            // a set negation flag means the complement of the combinator result
            result != composite.is_negated()
        }
    }
}

/// Evaluate an expression to a value. Missing attributes and failed
/// computations collapse to null.
#[must_use]
pub fn eval_expression(record: &Record, expression: &Expression) -> Value {
    match expression {
        Expression::Attribute(attr) => record.field(attr.name()).into_value(),
        Expression::Literal(value) => value.clone(),
        Expression::Numeric(num) => eval_numeric(record, num),
        Expression::Text(text) => eval_text(record, text),
    }
}

// Strict same-variant arithmetic; mixed variants and overflow collapse to
// null rather than widening.
fn eval_numeric(record: &Record, num: &NumericExpression) -> Value {
    let left = eval_expression(record, &num.left);
    let right = eval_expression(record, &num.right);

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            let result = match num.op {
                NumericOp::Add => a.checked_add(b),
                NumericOp::Subtract => a.checked_sub(b),
                NumericOp::Multiply => a.checked_mul(b),
                NumericOp::Divide => a.checked_div(b),
            };
            result.map_or(Value::Null, Value::Int)
        }
        (Value::Uint(a), Value::Uint(b)) => {
            let result = match num.op {
                NumericOp::Add => a.checked_add(b),
                NumericOp::Subtract => a.checked_sub(b),
                NumericOp::Multiply => a.checked_mul(b),
                NumericOp::Divide => a.checked_div(b),
            };
            result.map_or(Value::Null, Value::Uint)
        }
        (Value::Float32(a), Value::Float32(b)) => {
            let result = match num.op {
                NumericOp::Add => a.get() + b.get(),
                NumericOp::Subtract => a.get() - b.get(),
                NumericOp::Multiply => a.get() * b.get(),
                NumericOp::Divide => a.get() / b.get(),
            };
            Float32::try_new(result).map_or(Value::Null, Value::Float32)
        }
        (Value::Float64(a), Value::Float64(b)) => {
            let result = match num.op {
                NumericOp::Add => a.get() + b.get(),
                NumericOp::Subtract => a.get() - b.get(),
                NumericOp::Multiply => a.get() * b.get(),
                NumericOp::Divide => a.get() / b.get(),
            };
            Float64::try_new(result).map_or(Value::Null, Value::Float64)
        }
        (Value::IntBig(a), Value::IntBig(b)) => match num.op {
            NumericOp::Add => Value::IntBig(a + b),
            NumericOp::Subtract => Value::IntBig(a - b),
            NumericOp::Multiply => Value::IntBig(a * b),
            NumericOp::Divide => {
                if b.is_zero() {
                    Value::Null
                } else {
                    Value::IntBig(a / b)
                }
            }
        },
        (Value::Decimal(a), Value::Decimal(b)) => {
            let result = match num.op {
                NumericOp::Add => a.checked_add(b),
                NumericOp::Subtract => a.checked_sub(b),
                NumericOp::Multiply => a.checked_mul(b),
                NumericOp::Divide => a.checked_div(b),
            };
            result.map_or(Value::Null, Value::Decimal)
        }
        _ => Value::Null,
    }
}

fn eval_text(record: &Record, text: &TextExpression) -> Value {
    match text {
        TextExpression::Upper(inner) => match eval_expression(record, inner) {
            Value::Text(s) => Value::Text(s.to_uppercase()),
            _ => Value::Null,
        },
        TextExpression::Lower(inner) => match eval_expression(record, inner) {
            Value::Text(s) => Value::Text(s.to_lowercase()),
            _ => Value::Null,
        },
        TextExpression::Concat(parts) => {
            let mut out = String::new();
            for part in parts {
                match eval_expression(record, part) {
                    Value::Text(s) => out.push_str(&s),
                    _ => return Value::Null,
                }
            }
            Value::Text(out)
        }
    }
}

/// Evaluate one constraint against one value.
#[must_use]
pub fn eval_constraint(value: &Value, constraint: &Constraint) -> bool {
    match constraint {
        Constraint::EqualTo(v) => value == v,
        Constraint::NotEqualTo(v) => value != v,
        Constraint::GreaterThan(v) => gt(value, v),
        Constraint::LessThanOrEqual(v) => !gt(value, v),
        Constraint::GreaterThanOrEqual(v) => gte(value, v),
        Constraint::LessThan(v) => !gte(value, v),
        Constraint::Between { lower, upper } => between(value, lower, upper),
        Constraint::NotBetween { lower, upper } => !between(value, lower, upper),
        Constraint::In(vs) => vs.contains(value),
        Constraint::NotIn(vs) => !vs.contains(value),
        Constraint::Null => value.is_null(),
        Constraint::NotNull => !value.is_null(),
        Constraint::Like(pattern) => like(pattern, value),
        Constraint::NotLike(pattern) => !like(pattern, value),
    }
}

// Strict comparator: same-variant values only, canonical within the variant.
fn strict_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    if std::mem::discriminant(left) == std::mem::discriminant(right) {
        Some(canonical_cmp(left, right))
    } else {
        None
    }
}

fn gt(value: &Value, operand: &Value) -> bool {
    strict_cmp(value, operand) == Some(Ordering::Greater)
}

fn gte(value: &Value, operand: &Value) -> bool {
    matches!(
        strict_cmp(value, operand),
        Some(Ordering::Greater | Ordering::Equal)
    )
}

fn between(value: &Value, lower: &Value, upper: &Value) -> bool {
    gte(value, lower) && !gt(value, upper)
}

fn like(pattern: &LikePattern, value: &Value) -> bool {
    let Value::Text(text) = value else {
        return false;
    };

    like_match(
        pattern.escaped(),
        pattern.escape(),
        pattern.is_case_sensitive(),
        text,
    )
}

///
/// LikeToken
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LikeToken {
    Single,
    Run,
    Literal(char),
}

/// Match a canonical `_`/`%` pattern (with escape semantics) against text.
#[must_use]
pub fn like_match(pattern: &str, escape: char, case_sensitive: bool, text: &str) -> bool {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        if ch == escape {
            // dangling escapes are rejected at construction; tolerate by
            // treating the escape itself as a literal
            let literal = chars.next().unwrap_or(escape);
            push_literal_token(&mut tokens, literal, case_sensitive);
        } else if ch == '_' {
            tokens.push(LikeToken::Single);
        } else if ch == '%' {
            tokens.push(LikeToken::Run);
        } else {
            push_literal_token(&mut tokens, ch, case_sensitive);
        }
    }

    let text: Vec<char> = if case_sensitive {
        text.chars().collect()
    } else {
        text.to_lowercase().chars().collect()
    };

    match_tokens(&tokens, &text)
}

fn push_literal_token(tokens: &mut Vec<LikeToken>, ch: char, case_sensitive: bool) {
    if case_sensitive {
        tokens.push(LikeToken::Literal(ch));
    } else {
        for folded in ch.to_lowercase() {
            tokens.push(LikeToken::Literal(folded));
        }
    }
}

// Greedy wildcard match with backtracking to the most recent run token.
fn match_tokens(tokens: &[LikeToken], text: &[char]) -> bool {
    let mut token_idx = 0usize;
    let mut text_idx = 0usize;
    let mut run: Option<usize> = None;
    let mut run_mark = 0usize;

    while text_idx < text.len() {
        match tokens.get(token_idx) {
            Some(LikeToken::Literal(c)) if *c == text[text_idx] => {
                token_idx += 1;
                text_idx += 1;
            }
            Some(LikeToken::Single) => {
                token_idx += 1;
                text_idx += 1;
            }
            Some(LikeToken::Run) => {
                run = Some(token_idx);
                run_mark = text_idx;
                token_idx += 1;
            }
            _ => {
                let Some(run_idx) = run else {
                    return false;
                };
                token_idx = run_idx + 1;
                run_mark += 1;
                text_idx = run_mark;
            }
        }
    }

    while matches!(tokens.get(token_idx), Some(LikeToken::Run)) {
        token_idx += 1;
    }

    token_idx == tokens.len()
}

///
/// TESTS
///
