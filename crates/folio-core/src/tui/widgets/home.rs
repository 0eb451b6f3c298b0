//! Home screen: resume banner above the featured and recent cards.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::state::AppState;
use crate::tui::style::Styles;

use super::grid::render_grid;

pub fn render_home(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).split(area);

    let line = match &state.last_seen {
        Some(seen) => Line::from(vec![
            Span::styled("Last seen  ", Styles::dim()),
            Span::styled(seen.label(), Styles::title()),
            Span::styled("   r", Styles::key()),
            Span::styled(" resume", Styles::dim()),
        ]),
        None => Line::from(Span::styled(
            "Nothing opened yet. Pick a project to start.",
            Styles::dim(),
        )),
    };
    let banner = Paragraph::new(line).block(
        Block::default()
            .title(" Continue ")
            .borders(Borders::ALL)
            .border_style(Styles::card_border()),
    );
    frame.render_widget(banner, chunks[0]);

    render_grid(frame, chunks[1], state);
}
