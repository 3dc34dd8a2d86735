//! CSV export of the currently rendered table. Every field is quoted, with
//! embedded quotes doubled, matching what the download button produced.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::render::TableView;

/// Default download name for exported results.
pub const DEFAULT_EXPORT_FILE: &str = "query_results.csv";

/// Write the table (header row first, then body rows) as CSV.
pub fn write_csv<W: Write>(table: &TableView, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(out);

    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Export the table to a file, creating or truncating it.
pub fn export_csv(table: &TableView, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(table, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> TableView {
        TableView {
            header: vec!["Name".to_string(), "Note".to_string()],
            rows: vec![vec!["Alice".to_string(), "said \"hi\"".to_string()]],
        }
    }

    fn export_to_string(table: &TableView) -> String {
        let mut buf = Vec::new();
        write_csv(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn every_field_is_quoted() {
        let csv = export_to_string(&view());
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("\"Name\",\"Note\""));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let csv = export_to_string(&view());
        assert!(csv.contains("\"said \"\"hi\"\"\""));
    }

    #[test]
    fn header_row_comes_first() {
        let table = TableView {
            header: vec!["A".to_string()],
            rows: vec![vec!["1".to_string()], vec!["2".to_string()]],
        };
        let csv = export_to_string(&table);
        assert_eq!(csv, "\"A\"\n\"1\"\n\"2\"\n");
    }
}
