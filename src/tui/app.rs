//! Main TUI application.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::config::DashboardConfig;
use crate::export;
use crate::provider::TicketProvider;
use crate::view::build_tickets_view;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Main TUI application.
pub struct App {
    provider: Box<dyn TicketProvider>,
    state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(provider: Box<dyn TicketProvider>, config: &DashboardConfig) -> Self {
        let is_live = provider.is_live();
        let source = provider.source().to_string();
        Self {
            provider,
            state: AppState::new(is_live, source, config),
            should_quit: false,
        }
    }

    /// Runs the TUI until the user quits.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);

        // Initial fetch.
        self.refresh();

        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) => {
                    if self.state.is_live && !self.state.paused {
                        self.refresh();
                    }
                }
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Refresh => {
                        self.provider.invalidate();
                        self.refresh();
                    }
                    KeyAction::Export => self.export(),
                    KeyAction::None => {}
                },
                Ok(Event::Resize) => {
                    // Geometry is re-read from the frame on every draw.
                }
                Ok(Event::Scroll(delta)) => {
                    if !self.state.popup.is_open() {
                        self.state.viewport.scroll_by(delta);
                    }
                }
                Err(_) => self.should_quit = true,
            }

            if self.should_quit {
                break;
            }
        }

        self.provider.close();

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Pulls a board from the provider and applies it when it is newer than
    /// the one on screen. Re-applying the same board would re-run the diff
    /// and wipe the new/modified highlights.
    fn refresh(&mut self) {
        if let Some(board) = self.provider.refresh() {
            if self.state.board_fetched_at != Some(board.fetched_at) {
                self.state.apply_board(board);
            }
        }
        self.state.last_error = self.provider.last_error().map(|e| e.to_string());
    }

    /// Exports the current view (filtered, sorted) to CSV and JSON files
    /// in the working directory.
    fn export(&mut self) {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let csv_path = format!("tixtop-export-{stamp}.csv");
        let json_path = format!("tixtop-export-{stamp}.json");

        let vm = build_tickets_view(&self.state.table, chrono::Utc::now().timestamp());
        let tickets = self.state.table.filtered_items();

        let result = export::write_csv(&csv_path, &vm)
            .and_then(|()| export::write_json(&json_path, &tickets));

        self.state.status_message = Some(match result {
            Ok(()) => {
                info!(csv = csv_path, json = json_path, "exported current view");
                format!("exported {} rows to {csv_path} / {json_path}", vm.rows.len())
            }
            Err(err) => format!("export failed: {err}"),
        });
    }
}
