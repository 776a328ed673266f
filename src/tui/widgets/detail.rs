//! Ticket detail popup.

use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::fmt;
use crate::model::Ticket;
use crate::tui::state::{AppState, PopupState};
use crate::tui::style::Styles;

use super::centered_rect;

pub fn render_detail(frame: &mut Frame, area: Rect, state: &mut AppState, ticket_id: u64) {
    let styles = Styles::new(state.theme);

    let Some(ticket) = state.table.items.iter().find(|t| t.id == ticket_id) else {
        // Ticket vanished; close the popup instead of drawing nothing.
        state.popup = PopupState::None;
        return;
    };

    let content = build_content(ticket, styles);
    let title = format!("Ticket #{}", ticket.id);

    let popup_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(styles.accent())
        .style(styles.text());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    // Clamp scroll to the content.
    let visible = chunks[0].height as usize;
    let max_scroll = content.len().saturating_sub(visible);
    let scroll = match &mut state.popup {
        PopupState::Detail { scroll, .. } => {
            *scroll = (*scroll).min(max_scroll);
            *scroll
        }
        _ => 0,
    };

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, chunks[0]);

    let footer = Line::from(vec![
        Span::styled("↑/↓", styles.accent()),
        Span::styled(" scroll  ", styles.dim()),
        Span::styled("Esc/Enter", styles.accent()),
        Span::styled(" close", styles.dim()),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}

fn build_content(ticket: &Ticket, styles: Styles) -> Vec<Line<'static>> {
    let now = Utc::now().timestamp();
    let mut lines = vec![
        kv("title", &ticket.name, styles),
        kv_styled(
            "status",
            ticket.status.name(),
            styles.from_class(ticket.status.style_class()),
            styles,
        ),
        kv_styled(
            "priority",
            ticket.priority.name(),
            styles.from_class(ticket.priority.style_class()),
            styles,
        ),
        kv("requester", &fmt::or_fallback(ticket.requester.as_deref()), styles),
        kv("assignee", &fmt::or_fallback(ticket.assignee.as_deref()), styles),
        kv("category", &fmt::or_fallback(ticket.category.as_deref()), styles),
        kv(
            "created",
            &format!(
                "{} ({} ago)",
                fmt::format_date_full(ticket.date_creation.as_deref()),
                fmt::format_age(ticket.date_creation.as_deref(), now)
            ),
            styles,
        ),
        kv(
            "updated",
            &fmt::format_date_full(ticket.date_mod.as_deref()),
            styles,
        ),
    ];

    if !ticket.extra.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("── other fields ──", styles.dim())));
        for (key, value) in &ticket.extra {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            lines.push(kv(key, &rendered, styles));
        }
    }

    lines
}

/// Key-value line, key right-aligned in the accent color.
fn kv(key: &str, value: &str, styles: Styles) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>12}: "), styles.accent()),
        Span::raw(value.to_string()),
    ])
}

fn kv_styled(
    key: &str,
    value: &str,
    style: ratatui::style::Style,
    styles: Styles,
) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>12}: "), styles.accent()),
        Span::styled(value.to_string(), style),
    ])
}
