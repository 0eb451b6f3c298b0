//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{debug, info, warn};

use crate::content::{ContentStore, PatchNoteLite};
use crate::last_seen::{LastSeenStore, SeenKind};
use crate::quest_log::parse_quest_log;
use crate::route::Route;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key, handle_mouse};
use super::render::render;
use super::state::{AppState, DetailView};

/// Main TUI application.
pub struct App {
    content: ContentStore,
    last_seen: LastSeenStore,
    state: AppState,
    should_quit: bool,
}

impl App {
    /// Creates a new App reading from `content` and persisting to `last_seen`.
    pub fn new(content: ContentStore, last_seen: LastSeenStore, wide_at: u16) -> Self {
        Self {
            content,
            last_seen,
            state: AppState::new(wide_at),
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal, tick_rate);

        // Restore terminal even when the loop failed
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let events = EventHandler::new(tick_rate);

        if let Ok(size) = terminal.size() {
            self.state.terminal_width = size.width;
        }

        self.reload_lists();
        self.open(Route::Home);
        info!(root = %self.content.root().display(), "folio started");

        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) => {
                    self.state.viewport.tick();
                }
                Ok(Event::Key(key)) => {
                    let action = handle_key(&mut self.state, key);
                    self.apply(action);
                }
                Ok(Event::Mouse(mouse)) => {
                    let action = handle_mouse(&mut self.state, mouse);
                    self.apply(action);
                }
                Ok(Event::Resize(width, _)) => {
                    self.state.terminal_width = width;
                }
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Navigate(route) => self.navigate(route),
            KeyAction::Back => self.back(),
            KeyAction::None => {}
        }
    }

    /// Opens `route`, remembering the current screen for [`App::back`].
    ///
    /// Top-level screens start a fresh history.
    fn navigate(&mut self, route: Route) {
        if route == self.state.route {
            return;
        }
        if route.is_detail() {
            let current = self.state.route.clone();
            self.state.history.push(current);
        } else {
            self.state.history.clear();
        }
        self.open(route);
    }

    fn back(&mut self) {
        let previous = self.state.history.pop().unwrap_or_default();
        self.open(previous);
    }

    /// Reloads projects and patch notes from disk.
    fn reload_lists(&mut self) {
        let loaded = self
            .content
            .projects_all()
            .and_then(|p| Ok((p, self.content.patch_notes_all()?)));
        match loaded {
            Ok((projects, notes)) => {
                debug!(projects = projects.len(), notes = notes.len(), "content loaded");
                self.state.projects = projects;
                self.state.patch_notes = notes;
                self.state.load_error = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to load content");
                self.state.load_error = Some(e.to_string());
            }
        }
    }

    /// Switches the screen to `route` and loads what it shows.
    fn open(&mut self, route: Route) {
        debug!(route = %route, "open");
        self.state.detail = DetailView::None;
        self.state.related_notes.clear();
        self.state.detail_scroll = 0;

        match &route {
            Route::Project(slug) => match self.content.project_by_slug(slug) {
                Ok(Some(item)) => {
                    let quests = parse_quest_log(&item.content);
                    self.state.related_notes = self.notes_of(slug);
                    self.state.detail = DetailView::Project { item, quests };
                    self.last_seen.remember(SeenKind::Project, slug);
                }
                Ok(None) => self.state.detail = DetailView::NotFound,
                Err(e) => {
                    warn!(error = %e, "failed to load project");
                    self.state.status_message = Some(e.to_string());
                    self.state.detail = DetailView::NotFound;
                }
            },
            Route::PatchNote(slug) => match self.content.patch_note_by_slug(slug) {
                Ok(Some(item)) => {
                    self.state.detail = DetailView::Patch(item);
                    self.last_seen.remember(SeenKind::Patch, slug);
                }
                Ok(None) => self.state.detail = DetailView::NotFound,
                Err(e) => {
                    warn!(error = %e, "failed to load patch note");
                    self.state.status_message = Some(e.to_string());
                    self.state.detail = DetailView::NotFound;
                }
            },
            Route::ProjectPatchNotes(project) => {
                self.state.related_notes = self.notes_of(project);
            }
            Route::Home | Route::Projects | Route::PatchNotes => {}
        }

        self.state.last_seen = self.last_seen.read();
        self.state.route = route;
        self.state.sync_grid();
    }

    fn notes_of(&self, project: &str) -> Vec<PatchNoteLite> {
        self.content
            .patch_notes_by_project(project)
            .unwrap_or_else(|e| {
                warn!(project, error = %e, "failed to load project patch notes");
                Vec::new()
            })
    }
}
