//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::route::Route;

use super::state::{AppState, PopupState};
use super::style::Styles;
use super::widgets::{
    render_footer, render_grid, render_header, render_help, render_home, render_patch_detail,
    render_project_detail, render_quit_confirm,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Screen
        Constraint::Length(1), // Key hints
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_content(frame, chunks[1], state);
    render_footer(frame, chunks[2], state);

    // Popups last to overlay everything.
    match &mut state.popup {
        PopupState::Help { scroll } => render_help(frame, area, &state.route, scroll),
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
        PopupState::None => {}
    }
}

/// Renders the screen for the current route.
fn render_content(frame: &mut Frame, area: Rect, state: &mut AppState) {
    state.card_hits.clear();

    if let Some(err) = &state.load_error {
        let lines = vec![
            Line::from(Span::styled(" Failed to load content", Styles::error())),
            Line::from(""),
            Line::from(err.clone()),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
        return;
    }

    match state.route {
        Route::Home => render_home(frame, area, state),
        Route::Projects | Route::PatchNotes | Route::ProjectPatchNotes(_) => {
            render_grid(frame, area, state)
        }
        Route::Project(_) => render_project_detail(frame, area, state),
        Route::PatchNote(_) => render_patch_detail(frame, area, state),
    }
}
