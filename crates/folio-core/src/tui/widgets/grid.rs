//! Scrollable card grid.
//!
//! Cards are drawn line by line so that cards cut by the viewport edge are
//! clipped instead of dropped while a smooth scroll is in flight.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt::{normalize_for_display, truncate};
use crate::tui::layout::{CARD_HEIGHT, CardView};
use crate::tui::state::AppState;
use crate::tui::style::Styles;

/// Horizontal gap between columns.
const COLUMN_GAP: u16 = 1;

fn pad_to(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let fill = width.saturating_sub(text.chars().count());
    format!("{text}{}", " ".repeat(fill))
}

/// Builds the [`CARD_HEIGHT`] lines of one card at `width` columns.
fn card_lines(view: &CardView, width: usize, selected: bool) -> Vec<Line<'static>> {
    let border = if selected {
        Styles::card_selected()
    } else {
        Styles::card_border()
    };
    let inner = width.saturating_sub(4);
    let edge = |l: &str, r: &str| {
        Line::from(Span::styled(
            format!("{l}{}{r}", "─".repeat(width.saturating_sub(2))),
            border,
        ))
    };
    let row = |spans: Vec<Span<'static>>| {
        let mut out = vec![Span::styled("│ ", border)];
        out.extend(spans);
        out.push(Span::styled(" │", border));
        Line::from(out)
    };

    // kicker on the left, accent on the right
    let accent = view.accent.as_deref().unwrap_or("");
    let accent = truncate(accent, inner / 2);
    let kicker_width = inner.saturating_sub(accent.chars().count());
    let head = row(vec![
        Span::styled(pad_to(&view.kicker, kicker_width), Styles::dim()),
        Span::styled(accent, Styles::accent()),
    ]);

    let title_style = if selected {
        Styles::selected()
    } else {
        Styles::title()
    };
    let title = row(vec![Span::styled(pad_to(&view.card.title, inner), title_style)]);

    let detail = match view.subtitle.as_deref().map(str::trim) {
        Some(sub) if !sub.is_empty() => Span::styled(
            pad_to(&normalize_for_display(sub), inner),
            Styles::default(),
        ),
        _ => Span::styled(
            pad_to(&view.badges.join(" · "), inner),
            Styles::badge(),
        ),
    };

    vec![
        edge("┌", "┐"),
        head,
        title,
        row(vec![detail]),
        edge("└", "┘"),
    ]
}

/// Renders the card sections of `state` into `area`.
///
/// Updates the viewport geometry, the navigator bindings and the mouse hit
/// areas as a side effect.
pub fn render_grid(frame: &mut Frame, area: Rect, state: &mut AppState) {
    state.relayout();
    state
        .viewport
        .set_geometry(area.height as usize, state.grid_layout.total_height);

    if state.sections.iter().all(|s| s.cards.is_empty()) {
        let msg = Paragraph::new(Line::from(Span::styled(
            " Nothing here yet.",
            Styles::dim(),
        )));
        frame.render_widget(msg, area);
        return;
    }

    let offset = state.viewport.offset;
    let height = area.height as usize;
    let visible = |y: usize| y >= offset && y < offset + height;
    let screen_row = |y: usize| area.y + (y - offset) as u16;

    for (section, &top) in state.sections.iter().zip(&state.grid_layout.section_tops) {
        if visible(top) {
            let header = Line::from(vec![
                Span::styled(format!(" {} ", section.label), Styles::section_label()),
                Span::styled(section.title.clone(), Styles::dim()),
            ]);
            frame.render_widget(
                Paragraph::new(header),
                Rect::new(area.x, screen_row(top), area.width, 1),
            );
        }
    }

    let columns = state.columns() as u16;
    let col_width = area
        .width
        .saturating_sub(COLUMN_GAP * (columns - 1))
        / columns;

    for placed in &state.grid_layout.cards {
        let view = &state.sections[placed.section].cards[placed.card];
        let x = area.x + placed.column as u16 * (col_width + COLUMN_GAP);
        let selected = state.grid.is_selected(view.id());
        let lines = card_lines(view, col_width as usize, selected);

        let mut first_row = None;
        let mut rows = 0;
        for (i, line) in lines.into_iter().enumerate().take(CARD_HEIGHT) {
            let y = placed.slot.top + i;
            if !visible(y) {
                continue;
            }
            let row = screen_row(y);
            first_row.get_or_insert(row);
            rows += 1;
            frame.render_widget(
                Paragraph::new(line).style(Style::default()),
                Rect::new(x, row, col_width, 1),
            );
        }
        if let Some(row) = first_row {
            state
                .card_hits
                .push((Rect::new(x, row, col_width, rows), view.id().to_string()));
        }
    }
}
