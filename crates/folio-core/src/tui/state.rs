//! Application state for TUI.

use ratatui::layout::Rect;
use tracing::debug;

use crate::card::{CardRef, recommended};
use crate::content::{
    MdxItem, PatchNoteFrontMatter, PatchNoteLite, ProjectFrontMatter, ProjectLite,
};
use crate::fmt::safe_text;
use crate::last_seen::{LastSeen, SeenKind};
use crate::navigator::{GridNavigator, Grouping};
use crate::quest_log::QuestCard;
use crate::route::Route;

use super::layout::{CardSlot, CardView, GridLayout, Section, layout};
use super::viewport::GridViewport;

/// Featured projects shown above the full listing.
pub const RECOMMENDED_LIMIT: usize = 2;
/// Patch notes shown on the patch notes screen.
pub const CURATED_PATCH_NOTES: usize = 12;
/// Patch notes shown on the home screen.
pub const HOME_RECENT_NOTES: usize = 3;

/// Popup overlay state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PopupState {
    #[default]
    None,
    Help {
        scroll: usize,
    },
    QuitConfirm,
}

/// Loaded entry for a detail screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailView {
    #[default]
    None,
    Project {
        item: MdxItem<ProjectFrontMatter>,
        quests: Vec<QuestCard>,
    },
    Patch(MdxItem<PatchNoteFrontMatter>),
    NotFound,
}

/// Card id for an entry; unique across projects and patch notes.
pub fn card_id(kind: SeenKind, slug: &str) -> String {
    format!("{}:{}", kind.as_str(), slug)
}

/// Detail screen a card id points at.
pub fn route_for_card(id: &str) -> Option<Route> {
    let (kind, slug) = id.split_once(':')?;
    match kind {
        "project" => Some(Route::Project(slug.to_string())),
        "patch" => Some(Route::PatchNote(slug.to_string())),
        _ => None,
    }
}

fn project_card(p: &ProjectLite) -> CardView {
    let mut view = CardView::new(
        CardRef {
            id: card_id(SeenKind::Project, &p.slug),
            ..CardRef::from(p)
        },
        "PROJECT",
    );
    view.subtitle = p.subtitle.clone();
    view.badges = p.keywords.iter().take(3).cloned().collect();
    if let Some(version) = p.version.as_deref().filter(|v| !v.trim().is_empty()) {
        view.kicker = format!("PROJECT · {}", version.trim());
    }
    if p.is_live() {
        view.accent = Some("LIVE".to_string());
    } else if p.featured {
        view.accent = Some("FEATURED".to_string());
    }
    view
}

fn patch_card(n: &PatchNoteLite) -> CardView {
    let kicker = match (safe_text(n.date.as_deref()), safe_text(n.version.as_deref())) {
        ("", "") => "PATCH NOTE".to_string(),
        (date, "") => date.to_string(),
        ("", version) => version.to_string(),
        (date, version) => format!("{date} · {version}"),
    };
    let mut view = CardView::new(
        CardRef {
            id: card_id(SeenKind::Patch, &n.slug),
            ..CardRef::from(n)
        },
        kicker,
    );
    view.subtitle = n.summary.clone();
    view.badges = n.tags.iter().take(3).cloned().collect();
    view.accent = n.project.clone();
    view
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    pub route: Route,
    /// Routes to return to on Esc from a detail screen.
    pub history: Vec<Route>,
    pub popup: PopupState,

    pub projects: Vec<ProjectLite>,
    /// Newest first.
    pub patch_notes: Vec<PatchNoteLite>,
    /// Notes of the project on screen.
    pub related_notes: Vec<PatchNoteLite>,
    pub detail: DetailView,
    /// Scroll of the detail text panel.
    pub detail_scroll: usize,

    pub grid: GridNavigator<CardSlot>,
    pub viewport: GridViewport,
    pub sections: Vec<Section>,
    pub grid_layout: GridLayout,
    /// Route the navigator was last mounted for.
    grid_route: Option<Route>,
    /// Screen areas of rendered cards, for mouse hit testing.
    pub card_hits: Vec<(Rect, String)>,

    pub last_seen: Option<LastSeen>,
    /// Content loading failure shown instead of the screen.
    pub load_error: Option<String>,
    /// Transient message shown in the header.
    pub status_message: Option<String>,
    pub terminal_width: u16,
    /// Width at which grids switch to two columns.
    pub wide_at: u16,
}

impl AppState {
    pub fn new(wide_at: u16) -> Self {
        Self {
            route: Route::Home,
            history: Vec::new(),
            popup: PopupState::None,
            projects: Vec::new(),
            patch_notes: Vec::new(),
            related_notes: Vec::new(),
            detail: DetailView::None,
            detail_scroll: 0,
            grid: GridNavigator::default(),
            viewport: GridViewport::default(),
            sections: Vec::new(),
            grid_layout: GridLayout::default(),
            grid_route: None,
            card_hits: Vec::new(),
            last_seen: None,
            load_error: None,
            status_message: None,
            terminal_width: 0,
            wide_at,
        }
    }

    /// Grid columns for the current terminal width.
    pub fn columns(&self) -> usize {
        if self.terminal_width >= self.wide_at { 2 } else { 1 }
    }

    /// Whether the current screen has a card grid.
    pub fn has_grid(&self) -> bool {
        !self.grid.is_empty()
    }

    /// Project slug the current screen belongs to, if any.
    pub fn context_project(&self) -> Option<String> {
        match (&self.route, &self.detail) {
            (Route::Project(slug), _) | (Route::ProjectPatchNotes(slug), _) => Some(slug.clone()),
            (Route::PatchNote(_), DetailView::Patch(item)) => {
                item.front_matter.resolved_project()
            }
            _ => None,
        }
    }

    /// Card sections for the current route.
    fn build_sections(&self) -> Vec<Section> {
        let section = |label: &str, title: String, grouping, cards| Section {
            label: label.to_string(),
            title,
            grouping,
            cards,
        };
        match &self.route {
            Route::Home => {
                let mut out = Vec::new();
                let featured: Vec<CardView> = self
                    .projects
                    .iter()
                    .filter(|p| p.featured)
                    .map(project_card)
                    .collect();
                if !featured.is_empty() {
                    out.push(section(
                        "FEATURED",
                        "Featured projects".to_string(),
                        Grouping::All,
                        featured,
                    ));
                }
                let recent: Vec<CardView> = self
                    .patch_notes
                    .iter()
                    .take(HOME_RECENT_NOTES)
                    .map(patch_card)
                    .collect();
                if !recent.is_empty() {
                    out.push(section(
                        "RECENT",
                        "Latest patch notes".to_string(),
                        Grouping::All,
                        recent,
                    ));
                }
                out
            }
            Route::Projects => {
                let all: Vec<CardView> = self.projects.iter().map(project_card).collect();
                let refs: Vec<CardRef> = all.iter().map(|v| v.card.clone()).collect();
                let picked = recommended(&refs, RECOMMENDED_LIMIT);
                let mut out = Vec::new();
                if !picked.is_empty() {
                    out.push(section(
                        "RECOMMENDED",
                        "Start here".to_string(),
                        Grouping::Recommended,
                        all.iter()
                            .filter(|v| picked.contains(&v.card))
                            .cloned()
                            .collect(),
                    ));
                }
                out.push(section(
                    "ALL",
                    format!("All projects ({})", all.len()),
                    Grouping::All,
                    all,
                ));
                out
            }
            Route::PatchNotes => vec![section(
                "PATCH NOTES",
                "Curated patch notes".to_string(),
                Grouping::All,
                self.patch_notes
                    .iter()
                    .take(CURATED_PATCH_NOTES)
                    .map(patch_card)
                    .collect(),
            )],
            Route::Project(_) => match &self.detail {
                DetailView::Project { .. } => vec![section(
                    "PATCH NOTES",
                    format!("Patch notes ({})", self.related_notes.len()),
                    Grouping::All,
                    self.related_notes.iter().map(patch_card).collect(),
                )],
                _ => Vec::new(),
            },
            Route::ProjectPatchNotes(project) => vec![section(
                "PATCH NOTES",
                format!("Patch notes of {project}"),
                Grouping::All,
                self.related_notes.iter().map(patch_card).collect(),
            )],
            Route::PatchNote(_) => Vec::new(),
        }
    }

    /// Rebuilds the grid for the current route and data.
    ///
    /// A route of a different kind remounts the navigator; the same kind with
    /// a different identity or list length replaces its list. Otherwise the
    /// selection is kept.
    pub fn sync_grid(&mut self) {
        self.sections = self.build_sections();
        let cards: Vec<CardRef> = self
            .sections
            .iter()
            .filter(|s| s.grouping == Grouping::All)
            .flat_map(|s| s.cards.iter().map(|c| c.card.clone()))
            .collect();

        let same_kind = self
            .grid_route
            .as_ref()
            .is_some_and(|r| std::mem::discriminant(r) == std::mem::discriminant(&self.route));
        if !same_kind {
            debug!(route = %self.route, cards = cards.len(), "mounting card grid");
            self.grid.initialize(cards);
            self.viewport.reset();
        } else if self.grid_route.as_ref() != Some(&self.route) || self.grid.len() != cards.len()
        {
            self.grid.on_list_changed(cards);
            self.viewport.reset();
        } else if self.grid.cards() != cards.as_slice() {
            self.grid.on_list_changed(cards);
        }
        self.grid_route = Some(self.route.clone());
        self.relayout();
    }

    /// Lays the sections out for the current width and rebinds card slots.
    pub fn relayout(&mut self) {
        self.grid_layout = layout(&self.sections, self.columns());
        self.grid.clear_bindings();
        for placed in &self.grid_layout.cards {
            let id = self.sections[placed.section].cards[placed.card].id().to_string();
            self.grid.bind(id, placed.grouping, placed.slot);
        }
        let height = self.viewport.height;
        self.viewport
            .set_geometry(height, self.grid_layout.total_height);
    }

    /// Detail screen of the selected card.
    pub fn selected_route(&self) -> Option<Route> {
        self.grid.activate().and_then(|c| route_for_card(&c.id))
    }

    /// Card id under a screen position.
    pub fn card_at(&self, column: u16, row: u16) -> Option<&str> {
        self.card_hits
            .iter()
            .find(|(rect, _)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(_, id)| id.as_str())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::navigator::InputKind;

    pub(crate) fn project(slug: &str, featured: bool, order: f64) -> ProjectLite {
        ProjectLite {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            featured,
            order: Some(order),
            ..ProjectLite::default()
        }
    }

    pub(crate) fn note(slug: &str, date: &str, project: Option<&str>) -> PatchNoteLite {
        PatchNoteLite {
            slug: slug.to_string(),
            title: format!("Note {slug}"),
            date: Some(date.to_string()),
            project: project.map(str::to_string),
            ..PatchNoteLite::default()
        }
    }

    pub(crate) fn state_on_projects() -> AppState {
        let mut state = AppState::new(100);
        state.terminal_width = 120;
        state.projects = vec![
            project("ttak", true, 1.0),
            project("on-fit", true, 2.0),
            project("chop", false, 1.0),
        ];
        state.route = Route::Projects;
        state.sync_grid();
        state
    }

    #[test]
    fn test_card_id_round_trip() {
        assert_eq!(card_id(SeenKind::Project, "ttak"), "project:ttak");
        assert_eq!(
            route_for_card("patch:p1"),
            Some(Route::PatchNote("p1".to_string()))
        );
        assert_eq!(route_for_card("blog:x"), None);
        assert_eq!(route_for_card("plain"), None);
    }

    #[test]
    fn test_projects_screen_sections() {
        let state = state_on_projects();
        assert_eq!(state.sections.len(), 2);
        assert_eq!(state.sections[0].grouping, Grouping::Recommended);
        assert_eq!(state.sections[0].cards.len(), 2);
        assert_eq!(state.grid.len(), 3);
        assert_eq!(state.grid.state().last_input, InputKind::Init);
        assert_eq!(
            state.selected_route(),
            Some(Route::Project("ttak".to_string()))
        );
    }

    #[test]
    fn test_canonical_binding_is_all_section() {
        let state = state_on_projects();
        let all_top = state.grid_layout.section_tops[1];
        let slot = state.grid.binding_for("project:ttak").unwrap();
        assert!(slot.top > all_top);
    }

    #[test]
    fn test_columns_follow_width() {
        let mut state = AppState::new(100);
        state.terminal_width = 99;
        assert_eq!(state.columns(), 1);
        state.terminal_width = 100;
        assert_eq!(state.columns(), 2);
    }

    #[test]
    fn test_same_kind_route_resets_list() {
        let mut state = AppState::new(100);
        state.patch_notes = vec![note("p1", "2026-01-02", Some("a"))];
        state.route = Route::ProjectPatchNotes("a".to_string());
        state.related_notes = state.patch_notes.clone();
        state.sync_grid();
        assert_eq!(state.grid.state().last_input, InputKind::Init);

        state.route = Route::ProjectPatchNotes("b".to_string());
        state.related_notes = vec![note("p9", "2026-01-01", Some("b"))];
        state.sync_grid();
        assert_eq!(state.grid.state().last_input, InputKind::Reset);
        assert_eq!(state.grid.state().index, Some(0));
    }

    #[test]
    fn test_resync_same_route_keeps_selection() {
        let mut state = state_on_projects();
        state.grid.pointer_moved();
        state.grid.hover("project:chop");
        state.sync_grid();
        assert_eq!(state.grid.state().index, Some(2));
        assert_eq!(state.grid.state().last_input, InputKind::Hover);
    }

    #[test]
    fn test_card_at_hit_test() {
        let mut state = AppState::new(100);
        state.card_hits = vec![(Rect::new(2, 3, 10, 5), "project:a".to_string())];
        assert_eq!(state.card_at(2, 3), Some("project:a"));
        assert_eq!(state.card_at(11, 7), Some("project:a"));
        assert_eq!(state.card_at(12, 7), None);
        assert_eq!(state.card_at(5, 8), None);
    }

    #[test]
    fn test_home_sections() {
        let mut state = AppState::new(100);
        state.projects = vec![project("ttak", true, 1.0), project("chop", false, 1.0)];
        state.patch_notes = (0..5)
            .map(|i| note(&format!("p{i}"), "2026-01-01", None))
            .collect();
        state.sync_grid();
        assert_eq!(state.sections.len(), 2);
        assert_eq!(state.sections[1].cards.len(), HOME_RECENT_NOTES);
        assert_eq!(state.grid.len(), 1 + HOME_RECENT_NOTES);
    }
}
