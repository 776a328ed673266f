//! TUI state types.

mod app_state;

pub use app_state::AppState;

/// Input mode: where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the filter line.
    Filter,
}

/// Active popup. At most one is open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    None,
    Help {
        scroll: usize,
    },
    /// Detail view for one ticket, opened with Enter on the focused row.
    Detail {
        ticket_id: u64,
        scroll: usize,
    },
    QuitConfirm,
}

impl PopupState {
    pub fn is_open(&self) -> bool {
        !matches!(self, PopupState::None)
    }
}
