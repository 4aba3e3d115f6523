//! Coercion of untyped filter values.
//!
//! Every function here is total: inputs that cannot be coerced yield `None`
//! (or `false`), never an error.

use serde_json::Value;

/// Null and the empty string mean "no filter".
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Coerce to an integer. Fractional input is truncated towards zero.
pub fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(num) => num.as_i64().or_else(|| num.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate(float: f64) -> Option<i64> {
    if float.is_finite() && float >= i64::MIN as f64 && float < i64::MAX as f64 {
        Some(float.trunc() as i64)
    } else {
        None
    }
}

/// Coerce to a boolean. Only recognised truthy spellings are `true`.
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(num) => num.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "t" | "yes" | "y" | "on"
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// The text form of a value: strings as they are, anything else as JSON.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
