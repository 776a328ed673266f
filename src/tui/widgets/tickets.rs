//! Ticket table widget with windowed rendering.
//!
//! Only the rows intersecting the viewport (plus overscan) are turned into
//! ratatui rows; focus and scroll state live in [`RowViewport`], which tracks
//! the whole logical list. Small lists skip the windowing entirely.

use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Row, Table, TableState};

use crate::tui::state::AppState;
use crate::tui::style::Styles;
use crate::view::build_tickets_view;

pub fn render_tickets(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let styles = Styles::new(state.theme);

    // Content lines inside the border, minus the header row.
    let content_lines = area.height.saturating_sub(3) as usize;
    state.viewport.set_viewport_lines(content_lines);

    let vm = build_tickets_view(&state.table, Utc::now().timestamp());
    let window = state.viewport.window();

    // Headers with sort indicator.
    let headers: Vec<Span> = vm
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let indicator = if i == vm.sort_column {
                if vm.sort_ascending { "▲" } else { "▼" }
            } else {
                ""
            };
            Span::styled(format!("{h}{indicator}"), styles.table_header())
        })
        .collect();
    let header = Row::new(headers).style(styles.table_header()).height(1);

    let focused = state.viewport.focused();

    // Materialize only the windowed slice.
    let rows: Vec<Row> = vm.rows[window.clone()]
        .iter()
        .map(|row| {
            let row_style = styles.from_class(row.style);
            let cells: Vec<Span> = row
                .cells
                .iter()
                .map(|cell| match cell.style {
                    Some(class) => Span::styled(cell.text.clone(), styles.from_class(class)),
                    None => Span::styled(cell.text.clone(), row_style),
                })
                .collect();
            Row::new(cells).height(1)
        })
        .collect();

    let mut widths: Vec<Constraint> = vm
        .widths
        .iter()
        .map(|w| Constraint::Length(*w))
        .collect();
    widths.push(Constraint::Min(10)); // TITLE takes the rest

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles.dim())
                .title(format!(" {} ", vm.title)),
        )
        .row_highlight_style(styles.focused_row());

    // Window-relative state: ratatui only ever sees the materialized slice.
    // The focused row is selected only while it intersects the viewport,
    // otherwise ratatui would scroll it into view and fight our offset.
    let mut table_state = TableState::default();
    if let Some((first, last)) = state.viewport.visible_range() {
        *table_state.offset_mut() = first - window.start;
        if (first..=last).contains(&focused) {
            table_state.select(Some(focused - window.start));
        }
    }

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(table, area, &mut table_state);
}
