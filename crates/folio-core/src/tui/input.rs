//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::navigator::Direction;
use crate::route::Route;

use super::state::{AppState, DetailView, PopupState, route_for_card};

/// Lines moved by PageUp/PageDown in text panels.
const PAGE: usize = 10;
/// Lines moved per mouse wheel step.
const WHEEL_STEP: isize = 3;

/// Result of handling a key or mouse event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Open a screen, remembering the current one.
    Navigate(Route),
    /// Return to the previous screen.
    Back,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.popup = PopupState::None;
        return KeyAction::Quit;
    }
    match state.popup {
        PopupState::QuitConfirm => handle_quit_confirm(state, key),
        PopupState::Help { .. } => handle_help(state, key),
        PopupState::None => handle_normal(state, key),
    }
}

/// Handles mouse input. Popups swallow all mouse events.
///
/// Motion arms hover before hovering the card under the pointer; a left click
/// opens the clicked card.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> KeyAction {
    if state.popup != PopupState::None {
        return KeyAction::None;
    }
    match mouse.kind {
        MouseEventKind::Moved => {
            state.grid.pointer_moved();
            if let Some(id) = state.card_at(mouse.column, mouse.row).map(str::to_string) {
                state.grid.hover(&id);
            }
            KeyAction::None
        }
        MouseEventKind::Down(MouseButton::Left) => state
            .card_at(mouse.column, mouse.row)
            .and_then(route_for_card)
            .map_or(KeyAction::None, KeyAction::Navigate),
        MouseEventKind::ScrollDown => {
            scroll_wheel(state, WHEEL_STEP);
            KeyAction::None
        }
        MouseEventKind::ScrollUp => {
            scroll_wheel(state, -WHEEL_STEP);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// The grid scrolls on list screens; the text panel scrolls on detail screens.
fn scroll_wheel(state: &mut AppState, delta: isize) {
    if state.has_grid() && !matches!(state.route, Route::Project(_)) {
        state.viewport.scroll_by(delta);
    } else {
        state.detail_scroll = state.detail_scroll.saturating_add_signed(delta);
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('y') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_help(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let PopupState::Help { scroll } = &mut state.popup else {
        return KeyAction::None;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => state.popup = PopupState::None,
        KeyCode::Up => *scroll = scroll.saturating_sub(1),
        KeyCode::Down => *scroll = scroll.saturating_add(1),
        KeyCode::PageUp => *scroll = scroll.saturating_sub(PAGE),
        KeyCode::PageDown => *scroll = scroll.saturating_add(PAGE),
        KeyCode::Home => *scroll = 0,
        _ => {}
    }
    KeyAction::None
}

fn direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn handle_normal(state: &mut AppState, key: KeyEvent) -> KeyAction {
    state.status_message = None;

    if let Some(dir) = direction(key.code) {
        if state.has_grid() {
            let columns = state.columns();
            state
                .grid
                .move_selection(dir, columns, &mut state.viewport);
        } else {
            match dir {
                Direction::Up => state.detail_scroll = state.detail_scroll.saturating_sub(1),
                Direction::Down => state.detail_scroll = state.detail_scroll.saturating_add(1),
                Direction::Left | Direction::Right => {}
            }
        }
        return KeyAction::None;
    }

    match key.code {
        KeyCode::Char('q') => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }
        KeyCode::Char('?') => {
            state.popup = PopupState::Help { scroll: 0 };
            KeyAction::None
        }
        KeyCode::Esc => {
            if state.route.is_detail() {
                KeyAction::Back
            } else if state.route != Route::Home {
                KeyAction::Navigate(Route::Home)
            } else {
                KeyAction::None
            }
        }
        KeyCode::Char('h') => goto(state, Route::Home),
        KeyCode::Char('c') => goto(state, Route::Projects),
        KeyCode::Char('p') => goto(state, Route::PatchNotes),
        KeyCode::Enter => match state.selected_route() {
            Some(route) => KeyAction::Navigate(route),
            None => KeyAction::None,
        },
        KeyCode::Char('n') => match (&state.route, &state.detail) {
            (Route::Project(slug), _) => {
                KeyAction::Navigate(Route::ProjectPatchNotes(slug.clone()))
            }
            (Route::PatchNote(_), DetailView::Patch(_)) => match state.context_project() {
                Some(project) => KeyAction::Navigate(Route::Project(project)),
                None => {
                    state.status_message = Some("No linked project".to_string());
                    KeyAction::None
                }
            },
            _ => KeyAction::None,
        },
        KeyCode::Char('r') => match &state.last_seen {
            Some(seen) => KeyAction::Navigate(seen.route()),
            None => {
                state.status_message = Some("Nothing opened yet".to_string());
                KeyAction::None
            }
        },
        KeyCode::PageUp => {
            state.detail_scroll = state.detail_scroll.saturating_sub(PAGE);
            KeyAction::None
        }
        KeyCode::PageDown => {
            state.detail_scroll = state.detail_scroll.saturating_add(PAGE);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Navigates unless already there.
fn goto(state: &AppState, route: Route) -> KeyAction {
    if state.route == route {
        KeyAction::None
    } else {
        KeyAction::Navigate(route)
    }
}
