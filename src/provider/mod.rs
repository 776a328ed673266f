//! Provider abstraction for ticket data sources.
//!
//! The TUI consumes tickets through `TicketProvider`, which hides whether
//! data comes from the live backend or from a JSON export on disk.

mod file;
mod live;

pub use file::FileProvider;
pub use live::LiveProvider;

use thiserror::Error;

use crate::model::Ticket;

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// One refresh worth of ticket data.
#[derive(Debug, Clone)]
pub struct TicketBoard {
    /// Epoch seconds when this data was obtained.
    pub fetched_at: i64,
    pub tickets: Vec<Ticket>,
}

/// Abstraction over ticket data sources.
///
/// Object-safe; the TUI holds a `Box<dyn TicketProvider>`.
pub trait TicketProvider {
    /// Returns the current board, if one has been loaded.
    fn current(&self) -> Option<&TicketBoard>;

    /// Refreshes the board.
    ///
    /// - Live mode: fetches from the backend, throttled to the configured
    ///   minimum interval; keeps the last good board on failure.
    /// - File mode: reloads the export from disk.
    ///
    /// Returns the board after the refresh attempt (possibly stale).
    fn refresh(&mut self) -> Option<&TicketBoard>;

    /// Whether this provider talks to a live backend.
    fn is_live(&self) -> bool;

    /// Error from the most recent refresh attempt, if it failed.
    fn last_error(&self) -> Option<&ProviderError>;

    /// Human-readable description of the source (URL or file path).
    fn source(&self) -> &str;

    /// Drops any freshness state so the next `refresh` hits the source.
    /// Default: nothing to invalidate.
    fn invalidate(&mut self) {}

    /// Releases backend resources (sessions). Default: nothing to do.
    fn close(&mut self) {}
}
