//! Summary panel: totals, status and priority distributions, and a
//! sparkline of tickets opened per day.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Sparkline};

use crate::model::{Priority, TicketStatus};
use crate::stats::OPENED_SERIES_DAYS;
use crate::tui::state::AppState;
use crate::tui::style::Styles;

/// Panel height: three metric lines, sparkline shares them, plus help line.
pub const SUMMARY_HEIGHT: u16 = 4;

pub fn render_summary(frame: &mut Frame, area: Rect, state: &AppState) {
    let styles = Styles::new(state.theme);
    let stats = &state.stats;

    let chunks = Layout::vertical([
        Constraint::Min(1),    // Metrics + sparkline
        Constraint::Length(1), // Help line
    ])
    .split(area);

    let spark_width = (OPENED_SERIES_DAYS as u16 + 2).max(18);
    let columns = Layout::horizontal([
        Constraint::Min(40),
        Constraint::Length(spark_width),
    ])
    .split(chunks[0]);

    let mut lines = Vec::with_capacity(3);

    let mut tix_spans = vec![Span::styled("TIX", styles.accent()), Span::raw(" │ ")];
    tix_spans.extend(metric("total", &stats.total.to_string(), styles.text(), styles));
    tix_spans.push(Span::raw("  "));
    tix_spans.extend(metric("open", &stats.open.to_string(), styles.text(), styles));
    tix_spans.push(Span::raw("  "));
    let unassigned_style = if stats.unassigned_open > 0 {
        styles.from_class(crate::view::RowStyleClass::Warning)
    } else {
        styles.text()
    };
    tix_spans.extend(metric(
        "unassigned",
        &stats.unassigned_open.to_string(),
        unassigned_style,
        styles,
    ));
    lines.push(Line::from(tix_spans));

    let mut status_spans = vec![Span::styled("STA", styles.dim()), Span::raw(" │ ")];
    for (i, status) in TicketStatus::ALL.iter().enumerate() {
        if i > 0 {
            status_spans.push(Span::raw("  "));
        }
        status_spans.extend(metric(
            status.name(),
            &stats.by_status[i].to_string(),
            styles.from_class(status.style_class()),
            styles,
        ));
    }
    lines.push(Line::from(status_spans));

    let mut pri_spans = vec![Span::styled("PRI", styles.dim()), Span::raw(" │ ")];
    for (i, priority) in Priority::ALL.iter().enumerate() {
        if i > 0 {
            pri_spans.push(Span::raw("  "));
        }
        pri_spans.extend(metric(
            priority.label(),
            &stats.by_priority[i].to_string(),
            styles.from_class(priority.style_class()),
            styles,
        ));
    }
    lines.push(Line::from(pri_spans));

    frame.render_widget(Paragraph::new(lines).style(styles.text()), columns[0]);

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::LEFT)
                .border_style(styles.dim())
                .title(Span::styled(
                    format!("opened/{OPENED_SERIES_DAYS}d"),
                    styles.dim(),
                )),
        )
        .data(&stats.opened_per_day)
        .style(styles.sparkline());
    frame.render_widget(sparkline, columns[1]);

    frame.render_widget(Paragraph::new(help_line(styles)), chunks[1]);
}

/// `label:` (dim) + right-aligned styled value.
fn metric(label: &str, value: &str, value_style: Style, styles: Styles) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("{label}:"), styles.dim()),
        Span::styled(format!("{value:>4}"), value_style),
    ]
}

fn help_line(styles: Styles) -> Line<'static> {
    let key = styles.accent();
    let text = styles.dim();
    Line::from(vec![
        Span::styled("↑↓", key),
        Span::styled(":move ", text),
        Span::styled("PgUp/PgDn", key),
        Span::styled(":page ", text),
        Span::styled("Enter", key),
        Span::styled(":detail ", text),
        Span::styled("s", key),
        Span::styled(":sort ", text),
        Span::styled("r", key),
        Span::styled(":rev ", text),
        Span::styled("/", key),
        Span::styled(":filter ", text),
        Span::styled("u", key),
        Span::styled(":refresh ", text),
        Span::styled("e", key),
        Span::styled(":export ", text),
        Span::styled("Space", key),
        Span::styled(":pause ", text),
        Span::styled("t", key),
        Span::styled(":theme ", text),
        Span::styled("?", key),
        Span::styled(":help ", text),
        Span::styled("q", key),
        Span::styled(":quit", text),
    ])
}
