use crate::colleges::sanitize::coerce_int;
use crate::models::college::CollegeRecord;

/// Stand-in fee for records whose `fees` is missing or unreadable, so they only
/// pass an absurdly high ceiling.
pub const UNKNOWN_FEES: u64 = 1_000_000_000;

/// Keeps the records whose fees are within `ceiling`, in their original order.
pub fn filter_by_budget(records: &[CollegeRecord], ceiling: u64) -> Vec<CollegeRecord> {
    records
        .iter()
        .filter(|r| effective_fees(r) <= ceiling)
        .cloned()
        .collect()
}

fn effective_fees(record: &CollegeRecord) -> u64 {
    record
        .get("fees")
        .and_then(coerce_int)
        .unwrap_or(UNKNOWN_FEES)
}

/// Parses a budget typed by the user: digits only, surrounding whitespace ignored.
/// `None` means the input itself is invalid, as opposed to "no matches".
pub fn parse_budget(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<u64>().ok()
}
