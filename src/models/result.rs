use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::format;

/// One row of query results: a flat mapping from column name to scalar.
/// Key order is the wire order (`preserve_order` on serde_json).
pub type Record = serde_json::Map<String, Value>;

/// How a column behaves for rendering and chart selection. Computed once per
/// result set from the first record and reused everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    DateLike,
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub kind: ColumnKind,
}

/// The ordered list of records returned by a query. Non-empty whenever it is
/// displayed; the header derives from the key order of the first record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    pub records: Vec<Record>,
}

impl ResultSet {
    pub fn new(records: Vec<Record>) -> Self {
        ResultSet { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names in the key order of the first record. Empty for an empty
    /// result set.
    pub fn header(&self) -> Vec<&str> {
        match self.records.first() {
            Some(first) => first.keys().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }

    /// Classify every column from the first record's values. Later rows are
    /// deliberately not checked; the first row is authoritative.
    pub fn columns(&self) -> Vec<ColumnDef> {
        match self.records.first() {
            Some(first) => first
                .iter()
                .map(|(name, value)| ColumnDef {
                    name: name.clone(),
                    kind: classify_value(value),
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

impl From<Vec<Record>> for ResultSet {
    fn from(records: Vec<Record>) -> Self {
        ResultSet::new(records)
    }
}

/// Tag a single cell value. Numbers and numeric strings are numeric; strings
/// with a leading `YYYY-MM-DD` date are date-like; everything else, nulls and
/// booleans included, is categorical.
pub fn classify_value(value: &Value) -> ColumnKind {
    match value {
        Value::Number(_) => ColumnKind::Numeric,
        Value::String(s) => {
            if format::leading_date(s).is_some() {
                ColumnKind::DateLike
            } else if s.trim().parse::<f64>().is_ok() {
                ColumnKind::Numeric
            } else {
                ColumnKind::Categorical
            }
        }
        _ => ColumnKind::Categorical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn classification_follows_first_record() {
        let results = ResultSet::new(vec![
            record(json!({"month": "Jan", "total": 5, "day": "2024-01-15"})),
            // Second row intentionally disagrees; it must not matter.
            record(json!({"month": 9, "total": "x", "day": null})),
        ]);

        let cols = results.columns();
        assert_eq!(cols[0].kind, ColumnKind::Categorical);
        assert_eq!(cols[1].kind, ColumnKind::Numeric);
        assert_eq!(cols[2].kind, ColumnKind::DateLike);
    }

    #[test]
    fn numeric_strings_classify_as_numeric() {
        assert_eq!(classify_value(&json!("42.5")), ColumnKind::Numeric);
        assert_eq!(classify_value(&json!(" 7 ")), ColumnKind::Numeric);
        assert_eq!(classify_value(&json!("1,234")), ColumnKind::Categorical);
    }

    #[test]
    fn nulls_and_bools_are_categorical() {
        assert_eq!(classify_value(&Value::Null), ColumnKind::Categorical);
        assert_eq!(classify_value(&json!(true)), ColumnKind::Categorical);
    }

    #[test]
    fn header_preserves_key_order() {
        let results = ResultSet::new(vec![record(json!({"b": 1, "a": 2, "c": 3}))]);
        assert_eq!(results.header(), vec!["b", "a", "c"]);
    }

    #[test]
    fn wire_shape_is_a_plain_array() {
        let results: ResultSet =
            serde_json::from_str(r#"[{"name":"x","count":1}]"#).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results.header(), vec!["name", "count"]);
    }
}
