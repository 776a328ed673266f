//! Header line: mode, source, data age, notifications.

use chrono::{Local, TimeZone};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, InputMode};
use crate::tui::style::Styles;

pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let styles = Styles::new(state.theme);

    let mode = if !state.is_live {
        "FILE"
    } else if state.paused {
        "PAUSED"
    } else {
        "LIVE"
    };

    let fetched = state
        .board_fetched_at
        .and_then(|ts| Local.timestamp_opt(ts, 0).single())
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());

    let mut spans = vec![
        Span::raw(" tixtop "),
        Span::raw("│ "),
        Span::raw(format!("{mode} ")),
        Span::raw("│ "),
        Span::raw(format!("{} ", state.source)),
        Span::raw("│ "),
        Span::raw(format!("fetched {fetched} ")),
    ];

    if state.input_mode == InputMode::Filter {
        spans.push(Span::raw("│ "));
        spans.push(Span::raw(format!("filter: {}_ ", state.filter_input)));
    } else if let Some(err) = &state.last_error {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(format!("{err} "), styles.error()));
    } else if let Some(msg) = &state.status_message {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(format!("{msg} "), styles.notice()));
    }

    let line = Line::from(spans).style(styles.header());
    frame.render_widget(Paragraph::new(line).style(styles.header()), area);
}
