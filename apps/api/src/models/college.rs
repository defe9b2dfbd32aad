use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single college as persisted in the store.
///
/// The model returns loosely-shaped objects, so the record keeps the whole JSON
/// object. `name`, `city`, `fees` and `rating` are the recognised fields; any
/// other field the model adds is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollegeRecord(Map<String, Value>);

impl CollegeRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The model's pick from a candidate set. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub name: String,
    pub reason: String,
}

/// Display projection of a record: every cell rendered as text, missing fields blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollegeRow {
    pub index: usize,
    pub name: String,
    pub city: String,
    pub fees: String,
    pub rating: String,
}

impl CollegeRow {
    pub fn from_record(index: usize, record: &CollegeRecord) -> Self {
        Self {
            index,
            name: cell(record.get("name")),
            city: cell(record.get("city")),
            fees: cell(record.get("fees")),
            rating: cell(record.get("rating")),
        }
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> CollegeRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_record_preserves_unknown_fields() {
        let r = record(json!({"name": "IIT Bombay", "fees": 200000, "naac": "A++"}));
        let back = serde_json::to_value(&r).unwrap();
        assert_eq!(back["naac"], "A++");
        assert_eq!(r.name(), Some("IIT Bombay"));
        assert_eq!(r.get("city"), None);
    }

    #[test]
    fn test_row_renders_missing_fields_blank() {
        let r = record(json!({"name": "VJTI", "fees": 85000, "rating": 4.2}));
        let row = CollegeRow::from_record(2, &r);
        assert_eq!(row.index, 2);
        assert_eq!(row.name, "VJTI");
        assert_eq!(row.city, "");
        assert_eq!(row.fees, "85000");
        assert_eq!(row.rating, "4.2");
    }

    #[test]
    fn test_comparison_deserializes_from_model_output() {
        let c: Comparison =
            serde_json::from_str(r#"{"name": "COEP", "reason": "Best placements"}"#).unwrap();
        assert_eq!(c.name, "COEP");
        assert_eq!(c.reason, "Best placements");
    }
}
