//! Value helpers: truthiness, numeric detection, loose comparison, display.
//!
//! Bound values, scope entries and grid records are all `serde_json::Value`s.
//! Records are `serde_json::Map`s; the crate enables `preserve_order`, so a
//! record's keys iterate in insertion order.

use serde_json::{Map, Value};

/// A single tabular row: column key to cell value, in natural key order.
pub type Record = Map<String, Value>;

/// Whether a value counts as "set" when read from a scope.
///
/// `null`, `false`, `0`, `""`, `"0"` and empty arrays/objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Whether a value is a number or a string that parses as one.
pub fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => parse_number(s).is_some(),
        _ => false,
    }
}

/// A numeric reading of a value. Integers stay exact; only non-integers
/// go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    fn to_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

fn parse_number(s: &str) -> Option<Number> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(int) = trimmed.parse::<i128>() {
        return Some(Number::Int(int));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Number::Float)
}

fn as_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .map(Number::Int)
            .or_else(|| n.as_f64().map(Number::Float)),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Compare two values the way form data compares: `"2"` equals `2`,
/// `"1.0"` equals `"1"`, everything else compares by its display form.
/// Two integers compare exactly, whatever their magnitude.
pub fn loosely_equals(a: &Value, b: &Value) -> bool {
    match (as_number(a), as_number(b)) {
        (Some(Number::Int(x)), Some(Number::Int(y))) => return x == y,
        (Some(x), Some(y)) => return x.to_f64() == y.to_f64(),
        _ => {}
    }
    match (a, b) {
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => a == b,
        _ => display(a) == display(b),
    }
}

/// Whether `needle` loosely equals any element of `haystack`.
pub fn contains_loosely(haystack: &[Value], needle: &Value) -> bool {
    haystack.iter().any(|item| loosely_equals(item, needle))
}

/// Plain-text form of a value as it appears in markup (before escaping).
///
/// `true` shows as `1` and `false` as nothing, the way form values read.
/// Arrays are joined with `,`; objects fall back to their JSON text.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_owned(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!("0")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!(7)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(["a"])));
    }

    #[test]
    fn numeric_detection() {
        assert!(is_numeric(&json!(3)));
        assert!(is_numeric(&json!("3.5")));
        assert!(is_numeric(&json!(" 12 ")));
        assert!(!is_numeric(&json!("abc")));
        assert!(!is_numeric(&json!("")));
        assert!(!is_numeric(&Value::Null));
    }

    #[test]
    fn loose_equality_across_types() {
        assert!(loosely_equals(&json!("2"), &json!(2)));
        assert!(loosely_equals(&json!("1.0"), &json!("1")));
        assert!(loosely_equals(&json!("a"), &json!("a")));
        assert!(!loosely_equals(&json!("a"), &json!("b")));
        assert!(!loosely_equals(&json!(["1"]), &json!("1")));
    }

    #[test]
    fn large_integers_compare_exactly() {
        let low = json!(9007199254740992u64);
        let high = json!(9007199254740993u64);
        assert!(!loosely_equals(&low, &high));
        assert!(!loosely_equals(&json!("9007199254740993"), &low));
        assert!(loosely_equals(&json!("9007199254740993"), &high));
        assert!(loosely_equals(&json!(u64::MAX), &json!(u64::MAX.to_string())));
        assert!(!loosely_equals(&json!(-1), &json!(u64::MAX)));
        assert!(loosely_equals(&json!(2.0), &json!(2)));
    }

    #[test]
    fn membership() {
        let selected = vec![json!("1"), json!(3)];
        assert!(contains_loosely(&selected, &json!(1)));
        assert!(contains_loosely(&selected, &json!("3")));
        assert!(!contains_loosely(&selected, &json!("2")));
    }

    #[test]
    fn display_forms() {
        assert_eq!(display(&Value::Null), "");
        assert_eq!(display(&json!(5)), "5");
        assert_eq!(display(&json!("x")), "x");
        assert_eq!(display(&json!(["a", 1])), "a,1");
        assert_eq!(display(&json!(true)), "1");
        assert_eq!(display(&json!(false)), "");
    }
}
