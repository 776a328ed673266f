//! UI-agnostic view model types.
//!
//! Presentation data with no dependency on the rendering framework: the TUI
//! maps style classes to ratatui styles through the active theme.

pub mod tickets;

pub use tickets::build_tickets_view;

/// Row- or cell-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Warning level (yellow).
    Warning,
    /// Critical level (red).
    Critical,
    /// Critical + bold. Major-priority tickets.
    CriticalBold,
    /// Positive/active (green). New tickets.
    Active,
    /// Dimmed (dark gray). Solved or closed tickets.
    Dimmed,
    /// Accent (cyan). Highlighted values in detail views.
    Accent,
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self { text, style: None }
    }

    pub fn styled(text: String, style: RowStyleClass) -> Self {
        Self {
            text,
            style: Some(style),
        }
    }
}

/// One table row, keyed by a stable entity id.
#[derive(Debug, Clone)]
pub struct ViewRow<Id> {
    pub id: Id,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableViewModel<Id> {
    pub title: String,
    pub headers: Vec<String>,
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow<Id>>,
    pub sort_column: usize,
    pub sort_ascending: bool,
}
