//! Sanitizer: coerces the model's loosely-typed `fees` and `rating` into
//! strict numbers before a record reaches the store.
//!
//! Never fails: anything unreadable becomes `0` / `0.0`.

use serde_json::{Map, Value};

use crate::models::college::CollegeRecord;

/// Normalizes a raw AI record. Fields other than `fees` and `rating` pass through.
pub fn sanitize(mut raw: Map<String, Value>) -> CollegeRecord {
    let fees = sanitize_fees(raw.get("fees"));
    let rating = sanitize_rating(raw.get("rating"));
    raw.insert("fees".to_string(), Value::from(fees));
    raw.insert("rating".to_string(), Value::from(rating));
    CollegeRecord::new(raw)
}

/// Integer coercion, falling back to the first run of digits in the value's text.
pub fn sanitize_fees(value: Option<&Value>) -> u64 {
    let Some(value) = value else {
        return 0;
    };
    coerce_int(value)
        .or_else(|| first_digit_run(&text_form(value)))
        .unwrap_or(0)
}

/// Real-number coercion. Negative or non-finite values count as unreadable.
pub fn sanitize_rating(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|r| r.is_finite() && *r >= 0.0).unwrap_or(0.0)
}

/// Strict non-negative integer coercion shared with the budget filter.
///
/// Accepts JSON integers, finite non-negative floats (truncated) and
/// numeric strings with an optional leading `+`.
pub(crate) fn coerce_int(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.strip_prefix('+').unwrap_or(s).parse::<u64>().ok()
        }
        _ => None,
    }
}

fn text_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// First contiguous run of ASCII digits, e.g. `"₹1,20,000"` → `1`.
fn first_digit_run(text: &str) -> Option<u64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let run = text[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .filter_map(|c| c.to_digit(10));
    Some(run.fold(0u64, |acc, d| {
        acc.saturating_mul(10).saturating_add(u64::from(d))
    }))
}
