//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, InputMode, PopupState};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Force a data refresh, bypassing the cache interval.
    Refresh,
    /// Export the current view to CSV and JSON.
    Export,
}

/// Navigation action for unified popup-scroll/row-focus dispatch.
enum NavAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Routes navigation: to the open popup's scroll if any, otherwise to the
/// ticket viewport (recording the tracked id after the focus move).
fn dispatch_navigation(state: &mut AppState, action: NavAction) {
    match &mut state.popup {
        PopupState::Help { scroll } | PopupState::Detail { scroll, .. } => match action {
            NavAction::Up => *scroll = scroll.saturating_sub(1),
            NavAction::Down => *scroll = scroll.saturating_add(1),
            NavAction::PageUp => *scroll = scroll.saturating_sub(10),
            NavAction::PageDown => *scroll = scroll.saturating_add(10),
            NavAction::Home => *scroll = 0,
            NavAction::End => {}
        },
        _ => {
            match action {
                NavAction::Up => state.viewport.focus_up(),
                NavAction::Down => state.viewport.focus_down(),
                NavAction::PageUp => state.viewport.focus_page_up(),
                NavAction::PageDown => state.viewport.focus_page_down(),
                NavAction::Home => state.viewport.focus_home(),
                NavAction::End => state.viewport.focus_end(),
            }
            state.track_focused();
        }
    }
}

/// Handles a key event and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if matches!(state.popup, PopupState::QuitConfirm) {
        return handle_quit_confirm(state, key);
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Filter => handle_filter_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('y') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // Row navigation (or popup scroll while a popup is open).
        KeyCode::Up | KeyCode::Char('k') => {
            dispatch_navigation(state, NavAction::Up);
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            dispatch_navigation(state, NavAction::Down);
            KeyAction::None
        }
        KeyCode::PageUp => {
            dispatch_navigation(state, NavAction::PageUp);
            KeyAction::None
        }
        KeyCode::PageDown => {
            dispatch_navigation(state, NavAction::PageDown);
            KeyAction::None
        }
        KeyCode::Home => {
            dispatch_navigation(state, NavAction::Home);
            KeyAction::None
        }
        KeyCode::End => {
            dispatch_navigation(state, NavAction::End);
            KeyAction::None
        }

        // Sorting.
        KeyCode::Char('s') | KeyCode::Char('S') => {
            state.table.next_sort_column();
            state.resync_selection();
            KeyAction::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            state.table.toggle_sort_direction();
            state.resync_selection();
            KeyAction::None
        }

        // Filter mode.
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Filter;
            state.filter_input.clear();
            KeyAction::None
        }

        // Theme toggle.
        KeyCode::Char('t') | KeyCode::Char('T') => {
            state.theme = state.theme.toggle();
            KeyAction::None
        }

        // Manual refresh (live mode).
        KeyCode::Char('u') | KeyCode::Char('U') | KeyCode::F(5) => KeyAction::Refresh,

        // Export the current view.
        KeyCode::Char('e') | KeyCode::Char('E') => KeyAction::Export,

        // Pause/resume auto-refresh.
        KeyCode::Char(' ') => {
            if state.is_live {
                state.paused = !state.paused;
            }
            KeyAction::None
        }

        // Row activation: detail popup for the focused ticket.
        KeyCode::Enter => {
            let focused_id = state.focused_ticket().map(|t| t.id);
            if matches!(state.popup, PopupState::Detail { .. }) {
                state.popup = PopupState::None;
            } else if let Some(ticket_id) = focused_id {
                state.popup = PopupState::Detail {
                    ticket_id,
                    scroll: 0,
                };
            }
            KeyAction::None
        }

        // Help.
        KeyCode::Char('?') => {
            state.popup = if matches!(state.popup, PopupState::Help { .. }) {
                PopupState::None
            } else {
                PopupState::Help { scroll: 0 }
            };
            KeyAction::None
        }

        KeyCode::Esc => {
            state.status_message = None;
            if state.popup.is_open() {
                state.popup = PopupState::None;
            }
            KeyAction::None
        }

        _ => KeyAction::None,
    }
}

fn handle_filter_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
            state.filter_input.clear();
            state.apply_filter_input();
            KeyAction::None
        }
        KeyCode::Enter => {
            // Filter already applied in real time; just leave the mode.
            state.input_mode = InputMode::Normal;
            KeyAction::None
        }
        KeyCode::Backspace => {
            state.filter_input.pop();
            state.apply_filter_input();
            KeyAction::None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return KeyAction::None;
            }
            state.filter_input.push(c);
            state.apply_filter_input();
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::model::{Priority, Ticket, TicketStatus};
    use crate::provider::TicketBoard;
    use crate::tui::style::ThemeKind;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use std::collections::BTreeMap;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ticket(id: u64, name: &str) -> Ticket {
        Ticket {
            id,
            name: name.to_string(),
            status: TicketStatus::New,
            priority: Priority::Medium,
            requester: None,
            assignee: None,
            category: None,
            date_creation: Some(format!("2024-01-{:02} 00:00:00", id)),
            date_mod: None,
            extra: BTreeMap::new(),
        }
    }

    fn state_with(count: u64) -> AppState {
        let mut state = AppState::new(true, "test".to_string(), &DashboardConfig::default());
        state.viewport.set_viewport_lines(10);
        state.apply_board(&TicketBoard {
            fetched_at: 0,
            tickets: (1..=count).map(|i| ticket(i, "t")).collect(),
        });
        state.status_message = None;
        state
    }

    #[test]
    fn arrows_clamp_at_boundaries() {
        let mut state = state_with(3);
        assert_eq!(state.viewport.focused(), 0);
        let _ = handle_key(&mut state, key(KeyCode::Up));
        assert_eq!(state.viewport.focused(), 0);

        for _ in 0..10 {
            let _ = handle_key(&mut state, key(KeyCode::Down));
        }
        assert_eq!(state.viewport.focused(), 2);
        let _ = handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.viewport.focused(), 2);
    }

    #[test]
    fn enter_opens_detail_for_focused_ticket() {
        let mut state = state_with(3);
        let _ = handle_key(&mut state, key(KeyCode::Down));
        let focused = state.focused_ticket().unwrap().id;
        let _ = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(
            state.popup,
            PopupState::Detail {
                ticket_id: focused,
                scroll: 0
            }
        );
        // Enter again closes it.
        let _ = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.popup, PopupState::None);
    }

    #[test]
    fn enter_on_empty_list_opens_nothing() {
        let mut state = state_with(0);
        let _ = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.popup, PopupState::None);
    }

    #[test]
    fn filter_mode_applies_in_real_time() {
        let mut state = state_with(3);
        let _ = handle_key(&mut state, key(KeyCode::Char('/')));
        assert_eq!(state.input_mode, InputMode::Filter);

        let _ = handle_key(&mut state, key(KeyCode::Char('2')));
        assert_eq!(state.table.filter.as_deref(), Some("2"));
        assert_eq!(state.viewport.row_count(), 1);

        // Esc cancels and restores the full list.
        let _ = handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.table.filter, None);
        assert_eq!(state.viewport.row_count(), 3);
    }

    #[test]
    fn quit_requires_confirmation() {
        let mut state = state_with(1);
        let action = handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::None);
        assert_eq!(state.popup, PopupState::QuitConfirm);

        let action = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(action, KeyAction::Quit);
        assert_eq!(state.popup, PopupState::None);
    }

    #[test]
    fn quit_confirmation_cancels_on_esc() {
        let mut state = state_with(1);
        let _ = handle_key(&mut state, key(KeyCode::Char('q')));
        let action = handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(action, KeyAction::None);
        assert_eq!(state.popup, PopupState::None);
    }

    #[test]
    fn theme_toggles_with_t() {
        let mut state = state_with(1);
        assert_eq!(state.theme, ThemeKind::Dark);
        let _ = handle_key(&mut state, key(KeyCode::Char('t')));
        assert_eq!(state.theme, ThemeKind::Light);
    }

    #[test]
    fn navigation_scrolls_open_popup_not_table() {
        let mut state = state_with(5);
        let _ = handle_key(&mut state, key(KeyCode::Enter));
        let before = state.viewport.focused();
        let _ = handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.viewport.focused(), before);
        match state.popup {
            PopupState::Detail { scroll, .. } => assert_eq!(scroll, 1),
            _ => panic!("detail popup should stay open"),
        }
    }

    #[test]
    fn navigation_returns_to_table_after_detail_ticket_vanishes() {
        let mut state = state_with(5);
        for _ in 0..4 {
            let _ = handle_key(&mut state, key(KeyCode::Down));
        }
        let focused = state.focused_ticket().unwrap().id;
        let _ = handle_key(&mut state, key(KeyCode::Enter));
        assert!(matches!(state.popup, PopupState::Detail { .. }));

        // Background refresh drops the ticket shown in the popup.
        state.apply_board(&TicketBoard {
            fetched_at: 1,
            tickets: (1..=5).filter(|&i| i != focused).map(|i| ticket(i, "t")).collect(),
        });
        assert_eq!(state.popup, PopupState::None);

        // Arrow keys move the table again, not an invisible popup.
        let before = state.viewport.focused();
        let _ = handle_key(&mut state, key(KeyCode::Up));
        assert_eq!(state.viewport.focused(), before.saturating_sub(1));
    }

    #[test]
    fn refresh_and_export_actions_surface() {
        let mut state = state_with(1);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('u'))), KeyAction::Refresh);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('e'))), KeyAction::Export);
    }

    #[test]
    fn space_pauses_only_live_mode() {
        let mut state = state_with(1);
        let _ = handle_key(&mut state, key(KeyCode::Char(' ')));
        assert!(state.paused);

        let mut offline = AppState::new(false, "file".to_string(), &DashboardConfig::default());
        let _ = handle_key(&mut offline, key(KeyCode::Char(' ')));
        assert!(!offline.paused);
    }
}
