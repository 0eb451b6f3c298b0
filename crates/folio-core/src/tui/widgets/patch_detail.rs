//! Patch note detail.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::content::{MdxItem, PatchNoteFrontMatter};
use crate::fmt::safe_text;
use crate::route::Route;
use crate::tui::state::{AppState, DetailView};
use crate::tui::style::Styles;

use super::detail_common::{kv, render_text_panel, section};

fn build_content(item: &MdxItem<PatchNoteFrontMatter>) -> Vec<Line<'static>> {
    let fm = &item.front_matter;
    let mut lines = Vec::new();

    for (key, value) in [("date", fm.date.as_deref()), ("version", fm.version.as_deref())] {
        let value = safe_text(value);
        if !value.is_empty() {
            lines.push(kv(key, value));
        }
    }
    if let Some(project) = fm.resolved_project() {
        lines.push(kv("project", &project));
    }
    if !fm.tags.is_empty() {
        lines.push(kv("tags", &fm.tags.join(" · ")));
    }
    if let Some(links) = &fm.links {
        for (key, value) in [
            ("repo", links.repo.as_deref()),
            ("velog", links.velog.as_deref()),
            ("live", links.live.as_deref()),
        ] {
            let value = safe_text(value);
            if !value.is_empty() {
                lines.push(kv(key, value));
            }
        }
    }

    let summary = safe_text(fm.summary.as_deref());
    if !summary.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(summary.to_string(), Styles::title())));
    }

    let body = item.content.trim();
    if !body.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("NOTES"));
        lines.extend(body.lines().map(|l| Line::from(l.trim_end().to_string())));
    }
    lines
}

pub fn render_patch_detail(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let DetailView::Patch(item) = &state.detail else {
        render_not_found(frame, area, &state.route);
        return;
    };
    let title = match item.front_matter.title.trim() {
        "" => item.slug.clone(),
        t => t.to_string(),
    };
    let content = build_content(item);
    render_text_panel(frame, area, &title, content, &mut state.detail_scroll);
}

/// Shown when a detail route names a missing entry.
pub fn render_not_found(frame: &mut Frame, area: Rect, route: &Route) {
    let lines = vec![
        Line::from(Span::styled(" Not found", Styles::error())),
        Line::from(Span::styled(format!(" {}", route.href()), Styles::dim())),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PatchNoteLinks;

    #[test]
    fn test_build_content() {
        let item = MdxItem {
            slug: "p1".to_string(),
            front_matter: PatchNoteFrontMatter {
                title: "Login fix".to_string(),
                date: Some("2026-01-31".to_string()),
                links: Some(PatchNoteLinks {
                    project: Some(" chop ".to_string()),
                    ..PatchNoteLinks::default()
                }),
                summary: Some("Cookies now persist.".to_string()),
                ..PatchNoteFrontMatter::default()
            },
            content: "\nFirst line\n\nSecond line  \n".to_string(),
        };
        let out: Vec<String> = build_content(&item)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        assert_eq!(out[0], "      date: 2026-01-31");
        assert_eq!(out[1], "   project: chop");
        assert!(out.contains(&"Cookies now persist.".to_string()));
        assert_eq!(out.last().map(String::as_str), Some("Second line"));
    }
}
