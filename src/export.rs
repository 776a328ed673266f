//! CSV and JSON export of the current table view.
//!
//! Exports reflect what the user sees: the filtered, sorted rows. JSON
//! additionally carries the full ticket objects (including `extra` fields)
//! so exports can be re-opened with `--file`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::model::Ticket;
use crate::view::TableViewModel;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes the view model as CSV, header row first.
pub fn write_csv<Id>(path: impl AsRef<Path>, vm: &TableViewModel<Id>) -> Result<(), ExportError> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{}", csv_line(vm.headers.iter().map(String::as_str)))?;
    for row in &vm.rows {
        writeln!(
            out,
            "{}",
            csv_line(row.cells.iter().map(|c| c.text.as_str()))
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Writes tickets as a JSON export readable by the file provider.
pub fn write_json(path: impl AsRef<Path>, tickets: &[&Ticket]) -> Result<(), ExportError> {
    let out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(out, &serde_json::json!({ "tickets": tickets }))?;
    Ok(())
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields.map(csv_field).collect::<Vec<_>>().join(",")
}

/// Quotes a field when it contains a delimiter, quote, or newline
/// (RFC 4180 escaping: embedded quotes doubled).
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{RowStyleClass, ViewCell, ViewRow};
    use std::fs;

    fn sample_vm() -> TableViewModel<u64> {
        TableViewModel {
            title: "Tickets".to_string(),
            headers: vec!["ID".to_string(), "TITLE".to_string()],
            widths: vec![6],
            rows: vec![
                ViewRow {
                    id: 1,
                    cells: vec![
                        ViewCell::plain("1".to_string()),
                        ViewCell::plain("plain title".to_string()),
                    ],
                    style: RowStyleClass::Normal,
                },
                ViewRow {
                    id: 2,
                    cells: vec![
                        ViewCell::plain("2".to_string()),
                        ViewCell::plain("has, comma and \"quotes\"".to_string()),
                    ],
                    style: RowStyleClass::Normal,
                },
            ],
            sort_column: 0,
            sort_ascending: true,
        }
    }

    #[test]
    fn csv_escapes_delimiters_and_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &sample_vm()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("ID,TITLE"));
        assert_eq!(lines.next(), Some("1,plain title"));
        assert_eq!(
            lines.next(),
            Some(r#"2,"has, comma and ""quotes""""#)
        );
    }

    #[test]
    fn json_export_round_trips_through_file_provider() {
        use crate::provider::{FileProvider, TicketProvider};

        let ticket: Ticket = serde_json::from_str(
            r#"{"id": 5, "name": "roundtrip", "status": 2, "priority": 4, "urgency": 1}"#,
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        write_json(&path, &[&ticket]).unwrap();

        let provider = FileProvider::from_path(&path).unwrap();
        let board = provider.current().unwrap();
        assert_eq!(board.tickets.len(), 1);
        assert_eq!(board.tickets[0].id, 5);
        assert_eq!(
            board.tickets[0].extra.get("urgency"),
            Some(&serde_json::json!(1))
        );
    }
}
