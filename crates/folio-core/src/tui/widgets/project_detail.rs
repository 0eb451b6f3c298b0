//! Project detail: meta and quest log panel above the project's patch notes.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};

use crate::content::{MdxItem, ProjectFrontMatter};
use crate::fmt::safe_text;
use crate::quest_log::QuestCard;
use crate::tui::state::{AppState, DetailView};
use crate::tui::style::Styles;

use super::detail_common::{bullet, kv, render_text_panel, section, visual_lines};
use super::grid::render_grid;

/// Minimum rows kept for the notes grid.
const MIN_GRID_HEIGHT: u16 = 8;

fn build_content(item: &MdxItem<ProjectFrontMatter>, quests: &[QuestCard]) -> Vec<Line<'static>> {
    let fm = &item.front_matter;
    let mut lines = Vec::new();

    let subtitle = safe_text(fm.subtitle.as_deref());
    if !subtitle.is_empty() {
        lines.push(Line::from(Span::styled(subtitle.to_string(), Styles::dim())));
        lines.push(Line::from(""));
    }

    for (key, value) in [
        ("status", fm.status.as_deref()),
        ("version", fm.version.as_deref()),
        ("date", fm.date.as_deref()),
    ] {
        let value = safe_text(value);
        if !value.is_empty() {
            lines.push(kv(key, value));
        }
    }
    if let Some(period) = &fm.period {
        let start = safe_text(period.start.as_deref());
        let end = safe_text(period.end.as_deref());
        if !start.is_empty() || !end.is_empty() {
            let end = if end.is_empty() { "now" } else { end };
            lines.push(kv("period", &format!("{start} ~ {end}")));
        }
    }
    if let Some(team) = &fm.team {
        if !team.composition.is_empty() {
            lines.push(kv("team", &team.composition.join(", ")));
        }
        let role = safe_text(team.role.as_deref());
        if !role.is_empty() {
            lines.push(kv("role", role));
        }
    }
    if let Some(links) = &fm.links {
        for (key, value) in [
            ("live", links.live.as_deref()),
            ("repo", links.repo.as_deref()),
            ("blog", links.blog.as_deref()),
        ] {
            let value = safe_text(value);
            if !value.is_empty() {
                lines.push(kv(key, value));
            }
        }
    }
    if !fm.keywords.is_empty() {
        lines.push(kv("keywords", &fm.keywords.join(" · ")));
    }
    for (area, stack) in &fm.tech {
        lines.push(kv(area, &stack.join(", ")));
    }

    if !fm.highlights.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("HIGHLIGHTS"));
        lines.extend(fm.highlights.iter().map(|h| bullet(h)));
    }
    if !fm.my_work.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("MY WORK"));
        lines.extend(fm.my_work.iter().map(|w| bullet(w)));
    }

    if !quests.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("QUEST LOG"));
        for quest in quests {
            let mut spans = vec![Span::styled("  ◆ ", Styles::badge())];
            if let Some(tag) = &quest.tag {
                spans.push(Span::styled(format!("[{tag}] "), Styles::badge()));
            }
            spans.push(Span::styled(quest.title.clone(), Styles::title()));
            lines.push(Line::from(spans));
            if let Some(desc) = &quest.desc {
                lines.push(Line::from(Span::styled(format!("    {desc}"), Styles::dim())));
            }
        }
    }
    lines
}

pub fn render_project_detail(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let DetailView::Project { item, quests } = &state.detail else {
        super::patch_detail::render_not_found(frame, area, &state.route);
        return;
    };
    let title = item.front_matter.title.trim().to_string();
    let title = if title.is_empty() { item.slug.clone() } else { title };
    let content = build_content(item, quests);

    if state.related_notes.is_empty() {
        let mut content = content;
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            "No patch notes for this project yet.",
            Styles::dim(),
        )));
        render_text_panel(frame, area, &title, content, &mut state.detail_scroll);
        return;
    }

    // Panel sized to its content, leaving room for the notes grid.
    let wanted = visual_lines(&content, area.width.saturating_sub(2) as usize) as u16 + 2;
    let panel = wanted.min(area.height.saturating_sub(MIN_GRID_HEIGHT)).max(3);
    let chunks = Layout::vertical([Constraint::Length(panel), Constraint::Min(1)]).split(area);

    render_text_panel(frame, chunks[0], &title, content, &mut state.detail_scroll);
    render_grid(frame, chunks[1], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Team;
    use crate::quest_log::parse_quest_log;

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_build_content_sections() {
        let item = MdxItem {
            slug: "chop".to_string(),
            front_matter: ProjectFrontMatter {
                title: "Chop".to_string(),
                subtitle: Some("Recipe cutter".to_string()),
                status: Some("live".to_string()),
                team: Some(Team {
                    composition: vec!["FE 1".to_string(), "BE 2".to_string()],
                    role: Some("frontend".to_string()),
                }),
                my_work: vec!["Auth".to_string()],
                ..ProjectFrontMatter::default()
            },
            content: String::new(),
        };
        let quests = parse_quest_log("Quest Log:\n- **[Auth] Cookies**\n  - CORS\n");
        let out = text(&build_content(&item, &quests));

        assert!(out.starts_with("Recipe cutter"));
        assert!(out.contains("    status: live"));
        assert!(out.contains("FE 1, BE 2"));
        assert!(out.contains("── MY WORK ──"));
        assert!(out.contains("[Auth] Cookies"));
        assert!(out.contains("    CORS"));
    }

    #[test]
    fn test_build_content_empty_front_matter() {
        let item = MdxItem {
            slug: "x".to_string(),
            front_matter: ProjectFrontMatter::default(),
            content: String::new(),
        };
        assert!(build_content(&item, &[]).is_empty());
    }
}
