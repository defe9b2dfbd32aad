//! Best-effort recovery of a JSON payload from model text that may carry prose
//! around it. Scans for the first opening and last closing delimiter; prose that
//! itself contains brackets or braces will confuse it.

use serde_json::{Map, Value};

/// Parses the span from the first `[` to the last `]`. Without both brackets the
/// whole text is parsed. Anything that is not a JSON array is an error.
pub fn extract_array(text: &str) -> Result<Vec<Value>, serde_json::Error> {
    let span = delimited(text, '[', ']').unwrap_or(text);
    serde_json::from_str::<Vec<Value>>(span)
}

/// Parses the span from the first `{` to the last `}` as a JSON object.
pub fn extract_object(text: &str) -> Result<Map<String, Value>, serde_json::Error> {
    let span = delimited(text, '{', '}').unwrap_or(text);
    serde_json::from_str::<Map<String, Value>>(span)
}

fn delimited(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (start <= end).then(|| &text[start..=end])
}
