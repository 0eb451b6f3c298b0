//! Help popup widget.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::route::Route;
use crate::tui::style::Styles;

use super::detail_common::section;

const GLOBAL_KEYS: &[(&str, &str)] = &[
    ("h", "Home"),
    ("c", "Projects"),
    ("p", "Patch notes"),
    ("Esc", "Back from a detail screen, home otherwise"),
    ("?", "Toggle this help"),
    ("q", "Quit (asks first)"),
    ("Ctrl+C", "Quit immediately"),
];

const GRID_KEYS: &[(&str, &str)] = &[
    ("← →", "Previous / next card"),
    ("↑ ↓", "Card above / below"),
    ("Enter", "Open the selected card"),
    ("mouse", "Move to hover, click to open, wheel to scroll"),
];

fn screen_keys(route: &Route) -> &'static [(&'static str, &'static str)] {
    match route {
        Route::Home => &[("r", "Resume the last opened entry")],
        Route::Project(_) => &[
            ("PgUp/PgDn", "Scroll the project panel"),
            ("n", "All patch notes of this project"),
        ],
        Route::PatchNote(_) => &[
            ("↑ ↓ PgUp/PgDn", "Scroll"),
            ("n", "Open the linked project"),
        ],
        _ => &[],
    }
}

fn key_lines(keys: &[(&str, &str)]) -> impl Iterator<Item = Line<'static>> {
    keys.iter().map(|(key, what)| {
        Line::from(vec![
            Span::styled(format!("{:>14}  ", key), Styles::key()),
            Span::raw(what.to_string()),
        ])
    })
}

fn build_content(route: &Route) -> Vec<Line<'static>> {
    let mut lines = vec![section("GLOBAL")];
    lines.extend(key_lines(GLOBAL_KEYS));
    if !matches!(route, Route::PatchNote(_)) {
        lines.push(Line::from(""));
        lines.push(section("CARDS"));
        lines.extend(key_lines(GRID_KEYS));
    }
    let extra = screen_keys(route);
    if !extra.is_empty() {
        lines.push(Line::from(""));
        lines.push(section(route.title()));
        lines.extend(key_lines(extra));
    }
    lines
}

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, route: &Route, scroll: &mut usize) {
    let popup_width = (area.width * 60 / 100).clamp(40, 80).min(area.width);
    let popup_height = (area.height * 80 / 100).clamp(10, 30).min(area.height);

    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let content = build_content(route);
    let content_lines = content.len();

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([
        Constraint::Min(1),    // Content
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Styles::default());
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Line::from(vec![
        Span::styled("Esc", Styles::key()),
        Span::styled(" close", Styles::dim()),
        Span::styled(scroll_info, Styles::dim()),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_context_sections() {
        let home = text(&build_content(&Route::Home));
        assert!(home.contains("── CARDS ──"));
        assert!(home.contains("Resume the last opened entry"));

        let note = text(&build_content(&Route::PatchNote("p1".into())));
        assert!(!note.contains("── CARDS ──"));
        assert!(note.contains("Open the linked project"));
    }
}
