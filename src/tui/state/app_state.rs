//! Main application state.

use crate::config::DashboardConfig;
use crate::model::Ticket;
use crate::provider::TicketBoard;
use crate::stats::TicketStats;
use crate::table::{TableRow, TableState};
use crate::tui::style::ThemeKind;
use crate::tui::viewport::RowViewport;
use crate::view::tickets::DEFAULT_SORT_COLUMN;

use super::{InputMode, PopupState};

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    pub input_mode: InputMode,
    /// Filter input buffer (mirrors the table filter while typing).
    pub filter_input: String,
    pub popup: PopupState,
    /// Ticket table: sort, filter, diff tracking.
    pub table: TableState<Ticket>,
    /// Windowed rendering and focus state for the ticket table.
    pub viewport: RowViewport,
    /// Aggregates for the summary panel, recomputed per refresh.
    pub stats: TicketStats,
    /// Epoch seconds of the board currently displayed.
    pub board_fetched_at: Option<i64>,
    /// Auto-refresh suspended (live mode).
    pub paused: bool,
    pub is_live: bool,
    /// Data source description for the header (URL or file path).
    pub source: String,
    pub theme: ThemeKind,
    /// Transient notification shown in the header (new tickets, export
    /// results, blocked actions). Cleared with Esc.
    pub status_message: Option<String>,
    /// Last provider error, shown until a refresh succeeds.
    pub last_error: Option<String>,
}

impl AppState {
    pub fn new(is_live: bool, source: String, config: &DashboardConfig) -> Self {
        Self {
            input_mode: InputMode::Normal,
            filter_input: String::new(),
            popup: PopupState::None,
            table: TableState::new(DEFAULT_SORT_COLUMN, false),
            viewport: RowViewport::new(config.viewport),
            stats: TicketStats::default(),
            board_fetched_at: None,
            paused: false,
            is_live,
            source,
            theme: config.theme,
            status_message: None,
            last_error: None,
        }
    }

    /// Applies a freshly fetched board: updates the table (diffing against
    /// the previous one), recomputes stats, re-resolves the selection, and
    /// raises a notification when new tickets arrived.
    pub fn apply_board(&mut self, board: &TicketBoard) {
        let new_count = self.table.update(board.tickets.clone());
        self.stats = TicketStats::compute(&board.tickets);
        self.board_fetched_at = Some(board.fetched_at);
        self.resync_selection();
        // An open detail popup whose ticket is gone would keep capturing
        // navigation keys while drawing nothing.
        if let PopupState::Detail { ticket_id, .. } = self.popup {
            if !self.table.items.iter().any(|t| t.id == ticket_id) {
                self.popup = PopupState::None;
            }
        }
        if new_count > 0 {
            self.status_message = Some(if new_count == 1 {
                "1 new ticket".to_string()
            } else {
                format!("{new_count} new tickets")
            });
        }
    }

    /// Re-resolves selection after anything that reorders or reshapes the
    /// filtered list: focus follows the tracked ticket id where possible,
    /// otherwise clamps to the current length.
    pub fn resync_selection(&mut self) {
        let len = self.table.filtered_items().len();
        self.viewport.set_row_count(len);
        let index = self.table.resolve_selection(self.viewport.focused());
        self.viewport.set_focus(index);
    }

    /// Records the ticket id under the focus so later reorders follow it.
    /// Called after every user-driven focus move.
    pub fn track_focused(&mut self) {
        self.table.tracked_id = self
            .table
            .filtered_items()
            .get(self.viewport.focused())
            .map(|t| t.row_id());
    }

    pub fn focused_ticket(&self) -> Option<&Ticket> {
        self.table
            .filtered_items()
            .get(self.viewport.focused())
            .copied()
    }

    /// Applies the filter buffer to the table and re-resolves selection.
    pub fn apply_filter_input(&mut self) {
        let filter = if self.filter_input.is_empty() {
            None
        } else {
            Some(self.filter_input.clone())
        };
        self.table.set_filter(filter);
        self.resync_selection();
    }
}
