//! Condition evaluation
//!
//! Equality is raw value equality, no type coercion.
//! Ordering operators compare numerically and fail closed: if either side
//! does not parse as a number the condition is false. Booleans count as
//! 1 and 0, so `Adulto >= 1` holds for `true`.

use serde_json::Value;

use crate::knowledge::{Condition, Operator};

/// Evaluates `condition` against an observed fact value.
pub fn evaluate(condition: &Condition, observed: &Value) -> bool {
    match &condition.operator {
        Operator::Eq => observed == &condition.value,
        Operator::Ne => observed != &condition.value,
        Operator::Gt => compare(observed, &condition.value, |a, b| a > b),
        Operator::Lt => compare(observed, &condition.value, |a, b| a < b),
        Operator::Ge => compare(observed, &condition.value, |a, b| a >= b),
        Operator::Le => compare(observed, &condition.value, |a, b| a <= b),
        Operator::Other(_) => false,
    }
}

fn compare(observed: &Value, literal: &Value, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (as_number(observed), as_number(literal)) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

/// Reads a value as `f64`: JSON numbers, booleans, or strings holding a
/// number.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cond(op: &str, value: Value) -> Condition {
        Condition::new("x", op, value)
    }

    #[test]
    fn test_equality_match() {
        assert!(evaluate(&cond("==", json!("sim")), &json!("sim")));
        assert!(!evaluate(&cond("==", json!("sim")), &json!("nao")));
        assert!(evaluate(&cond("!=", json!("sim")), &json!("nao")));
        assert!(!evaluate(&cond("!=", json!("sim")), &json!("sim")));
    }

    #[test]
    fn test_no_type_coercion() {
        // String "1" is not the number 1
        assert!(!evaluate(&cond("==", json!(1)), &json!("1")));
        assert!(evaluate(&cond("!=", json!(1)), &json!("1")));
        assert!(evaluate(&cond("==", json!(1)), &json!(1)));
    }

    #[test]
    fn test_ordering_parses_numbers() {
        assert!(evaluate(&cond(">", json!(18)), &json!(25)));
        assert!(evaluate(&cond(">", json!("18")), &json!("25")));
        assert!(evaluate(&cond("<=", json!(25.0)), &json!(" 25 ")));
        assert!(!evaluate(&cond("<", json!(25)), &json!(25)));
        assert!(evaluate(&cond(">=", json!(25)), &json!(25)));
    }

    #[test]
    fn test_ordering_with_non_numeric_is_false() {
        assert!(!evaluate(&cond(">", json!(18)), &json!("idoso")));
        assert!(!evaluate(&cond("<", json!("abc")), &json!(3)));
        assert!(!evaluate(&cond("<=", json!(1)), &Value::Null));
    }

    #[test]
    fn test_ordering_reads_booleans_as_bits() {
        assert!(evaluate(&cond(">=", json!(1)), &json!(true)));
        assert!(evaluate(&cond("<", json!(1)), &json!(false)));
        assert!(!evaluate(&cond(">", json!(0)), &json!(false)));
        // equality stays strict
        assert!(!evaluate(&cond("==", json!(1)), &json!(true)));
    }

    #[test]
    fn test_unknown_operator_is_false() {
        assert!(!evaluate(&cond("in", json!(["a"])), &json!("a")));
        assert!(!evaluate(&cond("~=", json!("a")), &json!("a")));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let c = cond(">", json!("2.5"));
        let v = json!(3);
        let first = evaluate(&c, &v);
        for _ in 0..100 {
            assert_eq!(evaluate(&c, &v), first);
        }
    }
}
