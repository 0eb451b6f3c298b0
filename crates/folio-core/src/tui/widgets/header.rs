//! Header bar with navigation entries, and the key hint footer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::route::Route;
use crate::tui::state::AppState;
use crate::tui::style::{Styles, Theme};

/// Hotkey and title of each top-level screen.
const NAV: [(char, &str); 3] = [('h', "HOME"), ('c', "PROJECTS"), ('p', "PATCH NOTES")];

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(8),  // Name
        Constraint::Min(20),    // Navigation
        Constraint::Length(40), // Location / status
    ])
    .split(area);

    frame.render_widget(Paragraph::new(" folio ").style(Styles::header()), chunks[0]);

    let active = state.route.title();
    let entries: Vec<Span> = NAV
        .iter()
        .flat_map(|(key, name)| {
            let style = if *name == active {
                Styles::nav_active()
            } else {
                Styles::nav_inactive()
            };
            vec![
                Span::styled(format!(" {key}:"), Styles::nav_inactive()),
                Span::styled(format!("{name} "), style),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(entries)).style(Styles::header()),
        chunks[1],
    );

    let (right, style) = match &state.status_message {
        Some(msg) => (msg.clone(), Styles::header().fg(Theme::BADGE)),
        None => (state.route.href(), Styles::header()),
    };
    frame.render_widget(Paragraph::new(right).style(style), chunks[2]);
}

/// Renders the key hint line for the current screen.
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut hints: Vec<(&str, &str)> = Vec::new();
    if state.has_grid() {
        hints.push(("←↑↓→", "move"));
        hints.push(("Enter", "open"));
    } else if state.route.is_detail() {
        hints.push(("↑/↓", "scroll"));
    }
    match state.route {
        Route::Project(_) => {
            hints.push(("PgUp/PgDn", "scroll"));
            hints.push(("n", "all notes"));
        }
        Route::PatchNote(_) => hints.push(("n", "project")),
        Route::Home if state.last_seen.is_some() => hints.push(("r", "resume")),
        _ => {}
    }
    hints.push(("Esc", if state.route.is_detail() { "back" } else { "home" }));
    hints.push(("?", "help"));
    hints.push(("q", "quit"));

    let spans: Vec<Span> = hints
        .into_iter()
        .flat_map(|(key, what)| {
            [
                Span::styled(format!(" {key}"), Styles::key()),
                Span::styled(format!(" {what} "), Styles::dim()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
