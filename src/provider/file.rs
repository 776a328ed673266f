//! Offline provider reading a JSON ticket export.
//!
//! Accepts either a plain array of tickets or an object with a `tickets`
//! array (the shape the export command writes). Useful for demos and for
//! working disconnected from the backend.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::Ticket;

use super::{ProviderError, TicketBoard, TicketProvider};

#[derive(Deserialize)]
struct Export {
    tickets: Vec<Ticket>,
}

#[derive(Debug)]
pub struct FileProvider {
    path: PathBuf,
    current: Option<TicketBoard>,
    last_error: Option<ProviderError>,
    source: String,
}

impl FileProvider {
    /// Loads the export eagerly so startup fails fast on a bad path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref().to_path_buf();
        let source = path.display().to_string();
        let board = load_board(&path)?;
        Ok(Self {
            path,
            current: Some(board),
            last_error: None,
            source,
        })
    }
}

fn load_board(path: &Path) -> Result<TicketBoard, ProviderError> {
    let raw = fs::read_to_string(path).map_err(|e| ProviderError::Io(e.to_string()))?;
    let tickets = parse_export(&raw)?;
    let fetched_at = fs::metadata(path)
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or_else(|| chrono::Utc::now().timestamp());
    Ok(TicketBoard {
        fetched_at,
        tickets,
    })
}

fn parse_export(raw: &str) -> Result<Vec<Ticket>, ProviderError> {
    if let Ok(tickets) = serde_json::from_str::<Vec<Ticket>>(raw) {
        return Ok(tickets);
    }
    serde_json::from_str::<Export>(raw)
        .map(|e| e.tickets)
        .map_err(|e| ProviderError::Parse(e.to_string()))
}

impl TicketProvider for FileProvider {
    fn current(&self) -> Option<&TicketBoard> {
        self.current.as_ref()
    }

    fn refresh(&mut self) -> Option<&TicketBoard> {
        match load_board(&self.path) {
            Ok(board) => {
                self.current = Some(board);
                self.last_error = None;
            }
            Err(err) => {
                self.last_error = Some(err);
            }
        }
        self.current.as_ref()
    }

    fn is_live(&self) -> bool {
        false
    }

    fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }

    fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_plain_array_export() {
        let file = write_temp(
            r#"[{"id": 1, "name": "a", "status": 1, "priority": 3},
                {"id": 2, "name": "b", "status": 6, "priority": 1}]"#,
        );
        let provider = FileProvider::from_path(file.path()).unwrap();
        let board = provider.current().unwrap();
        assert_eq!(board.tickets.len(), 2);
        assert!(!provider.is_live());
    }

    #[test]
    fn loads_wrapped_export() {
        let file = write_temp(r#"{"tickets": [{"id": 9, "name": "x", "status": 2, "priority": 2}]}"#);
        let provider = FileProvider::from_path(file.path()).unwrap();
        assert_eq!(provider.current().unwrap().tickets[0].id, 9);
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        let file = write_temp("{nope");
        let err = FileProvider::from_path(file.path()).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FileProvider::from_path("/nonexistent/tickets.json").unwrap_err();
        assert!(matches!(err, ProviderError::Io(_)));
    }

    #[test]
    fn refresh_keeps_last_good_board_on_failure() {
        let file = write_temp(r#"[{"id": 1, "name": "a", "status": 1, "priority": 3}]"#);
        let path = file.path().to_path_buf();
        let mut provider = FileProvider::from_path(&path).unwrap();
        drop(file); // deletes the temp file
        provider.refresh();
        assert!(provider.last_error().is_some());
        assert_eq!(provider.current().unwrap().tickets.len(), 1);
    }
}
