//! Builds the display table for a result set. Each call produces a fresh
//! `TableView`; nothing is appended to earlier output.

use serde::Serialize;
use serde_json::Value;

use crate::format;
use crate::models::ResultSet;

/// A fully formatted table: one header cell per column and one body row per
/// record, all cells already display strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableView {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Render a result set into a `TableView`. The header follows the key order
/// of the first record; body cells are looked up by key so a record with
/// extra or missing keys still lines up (missing keys show the null
/// placeholder). Headers are rewritten from `snake_case` to Title Case.
pub fn render_table(results: &ResultSet) -> TableView {
    let keys = results.header();

    let header = keys.iter().map(|&key| format::format_header(key)).collect();

    let rows = results
        .records
        .iter()
        .map(|record| {
            keys.iter()
                .map(|key| {
                    record
                        .get(*key)
                        .map(format::format_value)
                        .unwrap_or_else(|| format::format_value(&Value::Null))
                })
                .collect()
        })
        .collect();

    TableView { header, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use serde_json::json;

    fn records(value: serde_json::Value) -> ResultSet {
        let list: Vec<Record> = serde_json::from_value(value).unwrap();
        ResultSet::new(list)
    }

    #[test]
    fn one_cell_per_key_per_record() {
        let results = records(json!([
            {"month": "Jan", "total_sales": 1200},
            {"month": "Feb", "total_sales": 900},
        ]));

        let view = render_table(&results);
        assert_eq!(view.header, vec!["Month", "Total Sales"]);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0], vec!["Jan", "1,200"]);
        assert_eq!(view.rows[1], vec!["Feb", "900"]);
    }

    #[test]
    fn cells_are_looked_up_by_key_not_position() {
        // The second record carries its keys in a different order and adds
        // one the first record never declared.
        let results = records(json!([
            {"a": 1, "b": 2},
            {"b": 20, "a": 10, "c": 30},
        ]));

        let view = render_table(&results);
        assert_eq!(view.header, vec!["A", "B"]);
        assert_eq!(view.rows[1], vec!["10", "20"]);
    }

    #[test]
    fn missing_keys_show_the_placeholder() {
        let results = records(json!([
            {"a": 1, "b": 2},
            {"a": 3},
        ]));

        let view = render_table(&results);
        assert_eq!(view.rows[1], vec!["3", "-"]);
    }

    #[test]
    fn nulls_format_as_placeholder() {
        let results = records(json!([{"a": null}]));
        assert_eq!(render_table(&results).rows[0], vec!["-"]);
    }
}
