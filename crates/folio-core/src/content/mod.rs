//! Content loading for projects and patch notes.
//!
//! Content lives in two directories under a root:
//! - `projects/*.mdx` - one file per project
//! - `patch-notes/*.mdx` - one file per patch note
//!
//! Each file carries YAML front matter (see [`front_matter`]) and a body.

pub mod front_matter;
mod store;

pub use store::ContentStore;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::card::Rankable;
use front_matter::{lenient_bool, lenient_number, lenient_required_string, lenient_string};

/// Errors that can occur while reading content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Content directory is missing or not a directory.
    #[error(
        "content directory not found or not readable: {path}\n\
         expected structure:\n  {projects}/*.mdx\n  {patch_notes}/*.mdx"
    )]
    DirNotReadable {
        path: PathBuf,
        projects: PathBuf,
        patch_notes: PathBuf,
    },
    /// I/O error while reading a file or directory.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Front matter is not valid YAML for the expected shape.
    #[error("invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A parsed content file.
#[derive(Debug, Clone, PartialEq)]
pub struct MdxItem<F> {
    /// Slug derived from the file name (`chop.mdx` -> `chop`).
    pub slug: String,
    pub front_matter: F,
    /// Body text after the front matter.
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Period {
    #[serde(deserialize_with = "lenient_string")]
    pub start: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Team {
    pub composition: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    pub live: Option<String>,
    pub repo: Option<String>,
    pub blog: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PatchNoteLinks {
    pub project: Option<String>,
    pub repo: Option<String>,
    pub velog: Option<String>,
    pub live: Option<String>,
}

/// Front matter of a project file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectFrontMatter {
    /// Declared document type (`project`).
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient_required_string")]
    pub slug: String,
    #[serde(deserialize_with = "lenient_required_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub subtitle: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub order: Option<f64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub featured: Option<bool>,
    #[serde(deserialize_with = "lenient_string")]
    pub version: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    pub period: Option<Period>,
    pub team: Option<Team>,
    pub keywords: Vec<String>,
    pub links: Option<ProjectLinks>,
    pub highlights: Vec<String>,
    /// Stack grouped by area, e.g. `frontend: [Next.js, Tailwind]`.
    pub tech: BTreeMap<String, Vec<String>>,
    pub my_work: Vec<String>,
    pub cover: Option<String>,
    pub logo: Option<String>,
}

/// Front matter of a patch note file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PatchNoteFrontMatter {
    /// Declared document type (`patch`).
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient_required_string")]
    pub slug: String,
    #[serde(deserialize_with = "lenient_required_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub version: Option<String>,
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub project: Option<String>,
    pub links: Option<PatchNoteLinks>,
}

impl PatchNoteFrontMatter {
    /// Owning project slug: `project`, else `links.project`; blanks ignored.
    pub fn resolved_project(&self) -> Option<String> {
        let direct = self.project.as_deref().unwrap_or("").trim();
        if !direct.is_empty() {
            return Some(direct.to_string());
        }
        let linked = self
            .links
            .as_ref()
            .and_then(|l| l.project.as_deref())
            .unwrap_or("")
            .trim();
        (!linked.is_empty()).then(|| linked.to_string())
    }
}

/// Project projection used by listings and cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectLite {
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub version: Option<String>,
    pub status: Option<String>,
    pub featured: bool,
    pub order: Option<f64>,
    pub period: Option<Period>,
    pub keywords: Vec<String>,
    pub team: Option<Team>,
    pub links: Option<ProjectLinks>,
    pub cover: Option<String>,
    pub logo: Option<String>,
}

impl ProjectLite {
    fn from_item(item: MdxItem<ProjectFrontMatter>) -> Self {
        let fm = item.front_matter;
        let slug = non_blank(fm.slug).unwrap_or_else(|| item.slug.clone());
        let title = non_blank(fm.title).unwrap_or_else(|| item.slug.clone());
        Self {
            slug,
            title,
            subtitle: fm.subtitle,
            version: fm.version,
            status: fm.status,
            featured: fm.featured.unwrap_or(false),
            order: fm.order,
            period: fm.period,
            keywords: fm.keywords,
            team: fm.team,
            links: fm.links,
            cover: fm.cover,
            logo: fm.logo,
        }
    }

    /// Whether the project has a public deployment.
    pub fn is_live(&self) -> bool {
        self.links
            .as_ref()
            .and_then(|l| l.live.as_deref())
            .is_some_and(|s| !s.trim().is_empty())
    }
}

impl Rankable for ProjectLite {
    fn featured(&self) -> bool {
        self.featured
    }
    fn order(&self) -> Option<f64> {
        self.order
    }
    fn title(&self) -> &str {
        &self.title
    }
}

/// Patch note projection used by listings and cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchNoteLite {
    pub slug: String,
    pub title: String,
    pub date: Option<String>,
    pub version: Option<String>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub project: Option<String>,
    pub links: Option<PatchNoteLinks>,
}

impl PatchNoteLite {
    fn from_item(item: MdxItem<PatchNoteFrontMatter>) -> Self {
        let project = item.front_matter.resolved_project();
        let fm = item.front_matter;
        let slug = non_blank(fm.slug).unwrap_or_else(|| item.slug.clone());
        let title = non_blank(fm.title).unwrap_or_else(|| item.slug.clone());
        Self {
            slug,
            title,
            date: fm.date,
            version: fm.version,
            tags: fm.tags,
            summary: fm.summary,
            project,
            links: fm.links,
        }
    }
}

/// Newest first; notes without a date go last.
pub fn compare_patch_by_date_desc(a: &PatchNoteLite, b: &PatchNoteLite) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    let ad = a.date.as_deref().unwrap_or("");
    let bd = b.date.as_deref().unwrap_or("");
    match (ad.is_empty(), bd.is_empty()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => bd.cmp(ad),
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}
