//! Quit confirmation popup widget.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

/// Renders a centered quit confirmation popup.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let popup_width = (area.width * 50 / 100).clamp(30, 50).min(area.width);
    let popup_height = area.height.clamp(3, 7);

    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Leave folio ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let content = vec![
        Line::from("Quit the portfolio browser?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Styles::key()),
            Span::styled(" / ", Styles::dim()),
            Span::styled("q", Styles::key()),
            Span::styled(" quit   ", Styles::dim()),
            Span::styled("Esc", Styles::key()),
            Span::styled(" / ", Styles::dim()),
            Span::styled("n", Styles::key()),
            Span::styled(" stay", Styles::dim()),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .style(Styles::default());
    frame.render_widget(paragraph, inner);
}
