use crate::{
    constraint::{Constraint, ConstraintError},
    pattern::LikePattern,
    value::Value,
};
use proptest::prelude::*;

#[test]
fn negation_table_is_exact() {
    let cases = [
        (
            Constraint::equal_to(5i64),
            Constraint::not_equal_to(5i64),
        ),
        (
            Constraint::greater_than(10i64),
            Constraint::less_than_or_equal(10i64),
        ),
        (
            Constraint::less_than(10i64),
            Constraint::greater_than_or_equal(10i64),
        ),
        (
            Constraint::between(1i64, 9i64),
            Constraint::not_between(1i64, 9i64),
        ),
        (
            Constraint::in_values([1i64, 2, 3]).unwrap(),
            Constraint::not_in_values([1i64, 2, 3]).unwrap(),
        ),
        (Constraint::null(), Constraint::not_null()),
        (
            Constraint::like(LikePattern::expressed("a%").unwrap()),
            Constraint::not_like(LikePattern::expressed("a%").unwrap()),
        ),
    ];

    for (constraint, complement) in cases {
        assert_eq!(constraint.negate(), complement);
        assert_eq!(complement.negate(), constraint);
    }
}

#[test]
fn membership_rejects_empty_and_null_elements() {
    let err = Constraint::in_values(Vec::<Value>::new()).unwrap_err();
    assert_eq!(err, ConstraintError::NoElements);

    let err =
        Constraint::not_in_values([Value::Int(1), Value::Null, Value::Null]).unwrap_err();
    assert_eq!(err, ConstraintError::NullElement { index: 1 });
}

#[test]
fn display_is_canonical() {
    assert_eq!(Constraint::greater_than(100i64).to_string(), "> 100");
    assert_eq!(
        Constraint::like(LikePattern::substring("Glacier")).to_string(),
        "LIKE '%Glacier%' ESCAPE '\\'"
    );
    assert_eq!(
        Constraint::in_values(["a", "b"]).unwrap().to_string(),
        "IN ('a', 'b')"
    );
    assert_eq!(
        Constraint::between(1i64, 9i64).to_string(),
        "BETWEEN 1 AND 9"
    );
}

fn arb_scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<u64>().prop_map(Value::Uint),
        any::<bool>().prop_map(Value::Bool),
        "[a-zA-Z0-9_%]{0,8}".prop_map(Value::Text),
    ]
}

fn arb_constraint() -> impl Strategy<Value = Constraint> {
    prop_oneof![
        arb_scalar_value().prop_map(Constraint::EqualTo),
        arb_scalar_value().prop_map(Constraint::NotEqualTo),
        arb_scalar_value().prop_map(Constraint::GreaterThan),
        arb_scalar_value().prop_map(Constraint::GreaterThanOrEqual),
        arb_scalar_value().prop_map(Constraint::LessThan),
        arb_scalar_value().prop_map(Constraint::LessThanOrEqual),
        (arb_scalar_value(), arb_scalar_value())
            .prop_map(|(lower, upper)| Constraint::Between { lower, upper }),
        prop::collection::vec(arb_scalar_value(), 1..4).prop_map(Constraint::In),
        Just(Constraint::Null),
        Just(Constraint::NotNull),
        "[a-z]{0,6}".prop_map(|text| Constraint::Like(LikePattern::substring(text))),
    ]
}

proptest! {
    #[test]
    fn negation_is_an_involution(constraint in arb_constraint()) {
        prop_assert_eq!(constraint.negate().negate(), constraint);
    }
}
