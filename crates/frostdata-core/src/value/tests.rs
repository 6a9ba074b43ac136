use crate::value::{Float64, Value, canonical_cmp};
use std::cmp::Ordering;

#[test]
fn canonical_cmp_orders_same_variant_values() {
    assert_eq!(
        canonical_cmp(&Value::Int(1), &Value::Int(2)),
        Ordering::Less
    );
    assert_eq!(
        canonical_cmp(&Value::Text("b".into()), &Value::Text("a".into())),
        Ordering::Greater
    );
    assert_eq!(
        canonical_cmp(&Value::Uint(7), &Value::Uint(7)),
        Ordering::Equal
    );
}

#[test]
fn canonical_cmp_is_rank_only_across_variants() {
    // Int ranks below Text regardless of payload.
    assert_eq!(
        canonical_cmp(&Value::Int(i64::MAX), &Value::Text(String::new())),
        Ordering::Less
    );
    // Null ranks lowest.
    assert_eq!(
        canonical_cmp(&Value::Null, &Value::Bool(false)),
        Ordering::Less
    );
}

#[test]
fn canonical_cmp_lists_are_lexicographic_then_length() {
    let short = Value::List(vec![Value::Int(1)]);
    let long = Value::List(vec![Value::Int(1), Value::Int(2)]);

    assert_eq!(canonical_cmp(&short, &long), Ordering::Less);
    assert_eq!(canonical_cmp(&long, &short), Ordering::Greater);
    assert_eq!(canonical_cmp(&short, &short), Ordering::Equal);
}

#[test]
fn float_wrapper_rejects_non_finite_and_canonicalizes_negative_zero() {
    assert!(Float64::try_new(f64::NAN).is_none());
    assert!(Float64::try_new(f64::INFINITY).is_none());

    let neg_zero = Float64::try_new(-0.0).unwrap();
    let zero = Float64::try_new(0.0).unwrap();
    assert_eq!(neg_zero, zero);
    assert_eq!(neg_zero.get().to_bits(), 0.0f64.to_bits());
}

#[test]
fn value_equality_and_hash_are_structural() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(Value::Text("x".into()));
    set.insert(Value::Text("x".into()));
    set.insert(Value::Int(3));

    assert_eq!(set.len(), 2);
}

#[test]
fn value_serde_round_trips() {
    let value = Value::List(vec![
        Value::Int(-4),
        Value::Text("frost".into()),
        Value::Float64(Float64::try_new(2.5).unwrap()),
        Value::Null,
    ]);

    let json = serde_json::to_string(&value).unwrap();
    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(back, value);
}
