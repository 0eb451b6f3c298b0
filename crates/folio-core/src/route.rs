//! Screen addresses.
//!
//! Routes keep the path shapes of the published site so that stored
//! references (e.g. the last-seen marker) stay meaningful.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    /// Project selection grid.
    Projects,
    Project(String),
    PatchNotes,
    PatchNote(String),
    /// Patch notes of one project.
    ProjectPatchNotes(String),
}

impl Route {
    pub fn href(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Projects => "/contents".to_string(),
            Route::Project(slug) => format!("/contents/{slug}"),
            Route::PatchNotes => "/patch-notes".to_string(),
            Route::PatchNote(slug) => format!("/patch-notes/{slug}"),
            Route::ProjectPatchNotes(project) => format!("/patch-notes/project/{project}"),
        }
    }

    /// Parses an href; unknown shapes yield `None`.
    pub fn parse(href: &str) -> Option<Route> {
        let path = href.trim().trim_end_matches('/');
        let parts: Vec<&str> = path
            .split('/')
            .filter(|p| !p.is_empty())
            .collect();
        match parts.as_slice() {
            [] => Some(Route::Home),
            ["contents"] => Some(Route::Projects),
            ["contents", slug] => Some(Route::Project(slug.to_string())),
            ["patch-notes"] => Some(Route::PatchNotes),
            ["patch-notes", "project", project] => {
                Some(Route::ProjectPatchNotes(project.to_string()))
            }
            ["patch-notes", slug] => Some(Route::PatchNote(slug.to_string())),
            _ => None,
        }
    }

    /// Detail screens go back in history on Esc; list screens go home.
    pub fn is_detail(&self) -> bool {
        matches!(
            self,
            Route::Project(_) | Route::PatchNote(_) | Route::ProjectPatchNotes(_)
        )
    }

    /// Short upper-case title for navigation chrome.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "HOME",
            Route::Projects | Route::Project(_) => "PROJECTS",
            Route::PatchNotes | Route::PatchNote(_) | Route::ProjectPatchNotes(_) => {
                "PATCH NOTES"
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_href_shapes() {
        assert_eq!(Route::Home.href(), "/");
        assert_eq!(Route::Projects.href(), "/contents");
        assert_eq!(Route::Project("ttak".into()).href(), "/contents/ttak");
        assert_eq!(Route::PatchNote("p1".into()).href(), "/patch-notes/p1");
        assert_eq!(
            Route::ProjectPatchNotes("chop".into()).href(),
            "/patch-notes/project/chop"
        );
    }

    #[test]
    fn test_parse_inverts_href() {
        for route in [
            Route::Home,
            Route::Projects,
            Route::Project("on-fit".into()),
            Route::PatchNotes,
            Route::PatchNote("p1".into()),
            Route::ProjectPatchNotes("ttak".into()),
        ] {
            assert_eq!(Route::parse(&route.href()), Some(route));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Route::parse("/system"), None);
        assert_eq!(Route::parse("/contents/a/b"), None);
        assert_eq!(Route::parse("/contents/"), Some(Route::Projects));
    }

    #[test]
    fn test_is_detail() {
        assert!(Route::Project("a".into()).is_detail());
        assert!(!Route::Projects.is_detail());
        assert!(!Route::Home.is_detail());
    }
}
