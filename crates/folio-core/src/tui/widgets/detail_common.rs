//! Shared primitives for detail screens.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::style::Styles;

/// Section header: `── {name} ──`
pub fn section(name: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("── {} ──", name),
        Styles::section_label(),
    ))
}

/// Key-value line. Key is right-aligned 10 chars with colon.
pub fn kv(key: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>10}: ", key), Styles::section_label()),
        Span::raw(value.to_string()),
    ])
}

/// Bulleted line, indented.
pub fn bullet(text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("  • ", Styles::dim()),
        Span::raw(text.to_string()),
    ])
}

/// Estimated line count after wrapping `content` at `width`.
pub fn visual_lines(content: &[Line<'_>], width: usize) -> usize {
    if width == 0 {
        return content.len();
    }
    content
        .iter()
        .map(|line| match line.width() {
            0 => 1,
            w => w.div_ceil(width),
        })
        .sum()
}

/// Renders `content` in a bordered, wrapped and scrolled panel.
///
/// `scroll` is clamped to the content so overscrolling never leaves a blank
/// panel.
pub fn render_text_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    content: Vec<Line<'static>>,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Styles::card_border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let total = visual_lines(&content, inner.width as usize);
    let max_scroll = total.saturating_sub(inner.height as usize);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .style(Styles::default())
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0));
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_lines_wraps_and_counts_blank() {
        let content = vec![Line::from("x".repeat(25)), Line::from(""), Line::from("abc")];
        assert_eq!(visual_lines(&content, 10), 3 + 1 + 1);
        assert_eq!(visual_lines(&content, 0), 3);
    }
}
