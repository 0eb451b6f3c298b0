//! Directory-backed content store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::front_matter;
use super::{
    ContentError, MdxItem, PatchNoteFrontMatter, PatchNoteLite, ProjectFrontMatter, ProjectLite,
    compare_patch_by_date_desc,
};
use crate::card::rank_cmp;

const PROJECT_DIR: &str = "projects";
const PATCH_DIR: &str = "patch-notes";
const EXTENSION: &str = "mdx";

/// Reads projects and patch notes from a content root.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Creates a store over `root` (containing `projects/` and `patch-notes/`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn project_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    fn patch_dir(&self) -> PathBuf {
        self.root.join(PATCH_DIR)
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    /// All projects, featured first, then by `order`, then by title.
    pub fn projects_all(&self) -> Result<Vec<ProjectLite>, ContentError> {
        let items = self.read_dir::<ProjectFrontMatter>(&self.project_dir())?;
        let mut list: Vec<ProjectLite> = items.into_iter().map(ProjectLite::from_item).collect();
        list.sort_by(rank_cmp);
        debug!(count = list.len(), "loaded projects");
        Ok(list)
    }

    /// File-name slugs of all projects.
    pub fn project_slugs(&self) -> Result<Vec<String>, ContentError> {
        self.slugs_in(&self.project_dir())
    }

    /// Loads a single project; `Ok(None)` when no such file exists.
    pub fn project_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<MdxItem<ProjectFrontMatter>>, ContentError> {
        self.read_by_slug(&self.project_dir(), slug)
    }

    // -----------------------------------------------------------------------
    // Patch notes
    // -----------------------------------------------------------------------

    /// All patch notes, newest first.
    pub fn patch_notes_all(&self) -> Result<Vec<PatchNoteLite>, ContentError> {
        let items = self.read_dir::<PatchNoteFrontMatter>(&self.patch_dir())?;
        let mut list: Vec<PatchNoteLite> =
            items.into_iter().map(PatchNoteLite::from_item).collect();
        list.sort_by(compare_patch_by_date_desc);
        debug!(count = list.len(), "loaded patch notes");
        Ok(list)
    }

    /// Patch notes belonging to `project_slug`, newest first.
    pub fn patch_notes_by_project(
        &self,
        project_slug: &str,
    ) -> Result<Vec<PatchNoteLite>, ContentError> {
        let key = project_slug.trim();
        let mut list: Vec<PatchNoteLite> = self
            .patch_notes_all()?
            .into_iter()
            .filter(|n| n.project.as_deref().unwrap_or("").trim() == key)
            .collect();
        list.sort_by(compare_patch_by_date_desc);
        Ok(list)
    }

    /// File-name slugs of all patch notes.
    pub fn patch_note_slugs(&self) -> Result<Vec<String>, ContentError> {
        self.slugs_in(&self.patch_dir())
    }

    /// Loads a single patch note; `Ok(None)` when no such file exists.
    pub fn patch_note_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<MdxItem<PatchNoteFrontMatter>>, ContentError> {
        self.read_by_slug(&self.patch_dir(), slug)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn ensure_dir_readable(&self, dir: &Path) -> Result<(), ContentError> {
        match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            _ => Err(ContentError::DirNotReadable {
                path: dir.to_path_buf(),
                projects: self.project_dir(),
                patch_notes: self.patch_dir(),
            }),
        }
    }

    /// Content file paths in `dir`, sorted by file name.
    fn content_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
        self.ensure_dir_readable(dir)?;
        let entries = fs::read_dir(dir).map_err(|source| ContentError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ContentError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn slugs_in(&self, dir: &Path) -> Result<Vec<String>, ContentError> {
        Ok(self
            .content_files(dir)?
            .iter()
            .filter_map(|p| slug_from_path(p))
            .collect())
    }

    /// Parses every content file in `dir`; unparsable files are skipped.
    fn read_dir<F>(&self, dir: &Path) -> Result<Vec<MdxItem<F>>, ContentError>
    where
        F: DeserializeOwned + Default + HasSlug,
    {
        let mut items = Vec::new();
        for path in self.content_files(dir)? {
            match read_file::<F>(&path) {
                Ok(item) => items.push(item),
                Err(e) => warn!(error = %e, "skipping content file"),
            }
        }
        Ok(items)
    }

    fn read_by_slug<F>(&self, dir: &Path, slug: &str) -> Result<Option<MdxItem<F>>, ContentError>
    where
        F: DeserializeOwned + Default + HasSlug,
    {
        let slug = slug.trim();
        if slug.is_empty() || slug.contains(['/', '\\']) || slug.starts_with('.') {
            return Ok(None);
        }
        let path = dir.join(format!("{slug}.{EXTENSION}"));
        match read_file::<F>(&path) {
            Ok(item) => Ok(Some(item)),
            Err(ContentError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Front matter types whose `slug` is filled from the file name when blank.
pub(super) trait HasSlug {
    fn slug_mut(&mut self) -> &mut String;
}

impl HasSlug for ProjectFrontMatter {
    fn slug_mut(&mut self) -> &mut String {
        &mut self.slug
    }
}

impl HasSlug for PatchNoteFrontMatter {
    fn slug_mut(&mut self) -> &mut String {
        &mut self.slug
    }
}

fn slug_from_path(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

fn read_file<F>(path: &Path) -> Result<MdxItem<F>, ContentError>
where
    F: DeserializeOwned + Default + HasSlug,
{
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (yaml, body) = front_matter::split(&raw);
    let mut fm: F = front_matter::decode(yaml, path)?;
    let slug = slug_from_path(path).unwrap_or_default();

    let fm_slug = fm.slug_mut();
    if fm_slug.trim().is_empty() {
        *fm_slug = slug.clone();
    }

    Ok(MdxItem {
        slug,
        front_matter: fm,
        content: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, text: &str) {
        fs::write(dir.join(name), text).unwrap();
    }

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let projects = tmp.path().join(PROJECT_DIR);
        let notes = tmp.path().join(PATCH_DIR);
        fs::create_dir_all(&projects).unwrap();
        fs::create_dir_all(&notes).unwrap();

        write(&projects, "chop.mdx", "---\ntitle: CHOP!\norder: 3\n---\nbody");
        write(
            &projects,
            "ttak.mdx",
            "---\ntitle: TTAK\nfeatured: true\norder: 1\n---\nQuest Log:\n- **[Auth] login**\n",
        );
        write(&projects, "on-fit.mdx", "---\ntitle: on-fit\norder: 2\n---\n");
        write(&projects, "broken.mdx", "---\ntitle: [unclosed\n---\n");
        write(&projects, "notes.txt", "ignored");

        write(
            &notes,
            "p1.mdx",
            "---\ntitle: First\ndate: 2026-01-02\nproject: ttak\n---\n",
        );
        write(
            &notes,
            "p2.mdx",
            "---\ntitle: Second\ndate: 2026-01-20\nlinks:\n  project: ttak\n---\n",
        );
        write(&notes, "p3.mdx", "---\ntitle: Other\ndate: 2026-01-10\nproject: chop\n---\n");
        write(&notes, "p4.mdx", "no front matter at all");
        tmp
    }

    #[test]
    fn test_projects_sorted_and_broken_skipped() {
        let tmp = fixture();
        let store = ContentStore::new(tmp.path());
        let projects = store.projects_all().unwrap();
        let slugs: Vec<_> = projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["ttak", "on-fit", "chop"]);
        assert!(projects[0].featured);
    }

    #[test]
    fn test_loose_order_and_featured_values_are_kept() {
        let tmp = TempDir::new().unwrap();
        let projects = tmp.path().join(PROJECT_DIR);
        fs::create_dir_all(&projects).unwrap();
        fs::create_dir_all(tmp.path().join(PATCH_DIR)).unwrap();

        write(&projects, "a.mdx", "---\ntitle: A\norder: 1\n---\n");
        write(&projects, "b.mdx", "---\ntitle: B\norder: 1.5\n---\n");
        write(&projects, "c.mdx", "---\ntitle: C\norder: \"2\"\n---\n");
        write(&projects, "d.mdx", "---\ntitle: D\norder: soon\n---\n");
        write(&projects, "e.mdx", "---\ntitle: E\nfeatured: \"true\"\n---\n");

        let store = ContentStore::new(tmp.path());
        let all = store.projects_all().unwrap();
        let slugs: Vec<_> = all.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["e", "a", "b", "c", "d"]);
        assert_eq!(all[2].order, Some(1.5));
        assert_eq!(all[3].order, Some(2.0));
        assert_eq!(all[4].order, None);
        assert!(all[0].featured);
    }

    #[test]
    fn test_project_slugs_include_unparsable_files() {
        let tmp = fixture();
        let store = ContentStore::new(tmp.path());
        assert_eq!(
            store.project_slugs().unwrap(),
            ["broken", "chop", "on-fit", "ttak"]
        );
    }

    #[test]
    fn test_project_by_slug() {
        let tmp = fixture();
        let store = ContentStore::new(tmp.path());

        let item = store.project_by_slug("ttak").unwrap().unwrap();
        assert_eq!(item.slug, "ttak");
        assert_eq!(item.front_matter.slug, "ttak");
        assert!(item.content.starts_with("Quest Log:"));

        assert!(store.project_by_slug("missing").unwrap().is_none());
        assert!(store.project_by_slug("../etc").unwrap().is_none());
        assert!(matches!(
            store.project_by_slug("broken"),
            Err(ContentError::FrontMatter { .. })
        ));
    }

    #[test]
    fn test_patch_notes_sorted_desc_and_filtered() {
        let tmp = fixture();
        let store = ContentStore::new(tmp.path());

        let all = store.patch_notes_all().unwrap();
        let slugs: Vec<_> = all.iter().map(|n| n.slug.as_str()).collect();
        assert_eq!(slugs, ["p2", "p3", "p1", "p4"]);
        assert_eq!(all[3].title, "p4");

        let ttak = store.patch_notes_by_project(" ttak ").unwrap();
        let slugs: Vec<_> = ttak.iter().map(|n| n.slug.as_str()).collect();
        assert_eq!(slugs, ["p2", "p1"]);

        assert!(store.patch_notes_by_project("none").unwrap().is_empty());
    }

    #[test]
    fn test_patch_note_by_slug_without_front_matter() {
        let tmp = fixture();
        let store = ContentStore::new(tmp.path());
        let item = store.patch_note_by_slug("p4").unwrap().unwrap();
        assert_eq!(item.front_matter.slug, "p4");
        assert_eq!(item.content, "no front matter at all");
    }

    #[test]
    fn test_missing_root_is_dir_not_readable() {
        let tmp = TempDir::new().unwrap();
        let store = ContentStore::new(tmp.path().join("nope"));
        let err = store.projects_all().unwrap_err();
        assert!(matches!(err, ContentError::DirNotReadable { .. }));
        assert!(err.to_string().contains("expected structure"));
    }
}
