//! Quit confirmation popup.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::{Styles, ThemeKind};

pub fn render_quit_confirm(frame: &mut Frame, area: Rect, theme: ThemeKind) {
    let styles = Styles::new(theme);

    let width = 34u16.min(area.width);
    let height = 3u16.min(area.height);
    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Quit? ")
        .borders(Borders::ALL)
        .border_style(styles.error())
        .style(styles.text());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Length(1)]).split(inner);
    let line = Line::from(vec![
        Span::styled("Enter/y", styles.accent()),
        Span::raw(" quit   "),
        Span::styled("Esc/n", styles.accent()),
        Span::raw(" stay"),
    ]);
    frame.render_widget(Paragraph::new(line).centered(), chunks[0]);
}
