//! Help popup listing key bindings.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::{Styles, ThemeKind};

use super::centered_rect;

const BINDINGS: &[(&str, &str)] = &[
    ("↑ / k", "focus previous ticket"),
    ("↓ / j", "focus next ticket"),
    ("PgUp / PgDn", "focus one page up / down"),
    ("Home / End", "focus first / last ticket"),
    ("wheel", "scroll the window without moving focus"),
    ("Enter", "open / close ticket detail"),
    ("s", "cycle sort column"),
    ("r", "reverse sort direction"),
    ("/", "filter tickets (Enter keep, Esc clear)"),
    ("u / F5", "refresh now, bypassing the cache interval"),
    ("e", "export current view to CSV and JSON"),
    ("Space", "pause / resume auto-refresh (live mode)"),
    ("t", "toggle dark / light theme"),
    ("Esc", "dismiss notification or popup"),
    ("?", "toggle this help"),
    ("q", "quit (with confirmation)"),
];

pub fn render_help(frame: &mut Frame, area: Rect, theme: ThemeKind, scroll: &mut usize) {
    let styles = Styles::new(theme);

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, text)| {
            Line::from(vec![
                Span::styled(format!("{key:>12}  "), styles.accent()),
                Span::styled((*text).to_string(), styles.text()),
            ])
        })
        .collect();

    let popup_area = centered_rect(50, 70, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(styles.accent())
        .style(styles.text());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let max_scroll = lines.len().saturating_sub(inner.height as usize);
    *scroll = (*scroll).min(max_scroll);

    let paragraph = Paragraph::new(lines).scroll((*scroll as u16, 0));
    frame.render_widget(paragraph, inner);
}
