//! Main rendering logic for the TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::{AppState, PopupState};
use super::widgets::{
    SUMMARY_HEIGHT, render_detail, render_header, render_help, render_quit_confirm,
    render_summary, render_tickets,
};

pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1),              // Header
        Constraint::Length(SUMMARY_HEIGHT), // Summary + help line
        Constraint::Min(5),                 // Ticket table
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_summary(frame, chunks[1], state);
    render_tickets(frame, chunks[2], state);

    // Popups overlay the whole frame, rendered last.
    match state.popup.clone() {
        PopupState::Help { mut scroll } => {
            render_help(frame, area, state.theme, &mut scroll);
            state.popup = PopupState::Help { scroll };
        }
        PopupState::Detail { ticket_id, .. } => {
            render_detail(frame, area, state, ticket_id);
        }
        PopupState::QuitConfirm => render_quit_confirm(frame, area, state.theme),
        PopupState::None => {}
    }
}
