//! Persisted "last opened" marker.
//!
//! The state file is a JSON object keyed like browser local storage, so the
//! marker lives under [`LAST_SEEN_KEY`] and unrelated keys are preserved:
//!
//! ```json
//! { "portfolio:lastSeen:v1": { "type": "project", "slug": "ttak", "at": 1769844000000 } }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::fmt::{format_kst, now_ms};
use crate::route::Route;

pub const LAST_SEEN_KEY: &str = "portfolio:lastSeen:v1";

/// Errors that can occur while persisting the marker.
#[derive(Debug, thiserror::Error)]
pub enum LastSeenError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("state file {path} does not hold a JSON object")]
    NotAnObject { path: PathBuf },
    #[error("failed to encode state: {0}")]
    Json(#[from] serde_json::Error),
}

/// What kind of entry was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeenKind {
    Project,
    Patch,
}

impl SeenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SeenKind::Project => "project",
            SeenKind::Patch => "patch",
        }
    }
}

/// The last opened project or patch note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastSeen {
    #[serde(rename = "type")]
    pub kind: SeenKind,
    pub slug: String,
    /// Epoch milliseconds.
    pub at: i64,
}

impl LastSeen {
    /// Validates a stored value; anything malformed yields `None`.
    ///
    /// A missing, non-finite or non-positive `at` is replaced with `now`.
    fn from_value(value: &Value, now: i64) -> Option<Self> {
        let obj = value.as_object()?;
        let kind = match obj.get("type")?.as_str()? {
            "project" => SeenKind::Project,
            "patch" => SeenKind::Patch,
            _ => return None,
        };
        let slug = obj.get("slug")?.as_str()?.trim();
        if slug.is_empty() {
            return None;
        }
        let at = obj
            .get("at")
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| v as i64)
            .unwrap_or(now);
        Some(Self {
            kind,
            slug: slug.to_string(),
            at,
        })
    }

    /// Screen address of the entry.
    pub fn route(&self) -> Route {
        match self.kind {
            SeenKind::Project => Route::Project(self.slug.clone()),
            SeenKind::Patch => Route::PatchNote(self.slug.clone()),
        }
    }

    /// `/contents/<slug>` or `/patch-notes/<slug>`.
    pub fn href(&self) -> String {
        self.route().href()
    }

    /// `project:ttak · 2026.01.31 16:20` (KST).
    pub fn label(&self) -> String {
        format!("{}:{} · {}", self.kind.as_str(), self.slug, format_kst(self.at))
    }
}

/// File-backed store for [`LastSeen`].
#[derive(Debug, Clone)]
pub struct LastSeenStore {
    path: PathBuf,
}

impl LastSeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the marker. Missing, unreadable or malformed state yields `None`.
    pub fn read(&self) -> Option<LastSeen> {
        let map = match self.load_map() {
            Ok(map) => map?,
            Err(e) => {
                warn!(error = %e, "failed to load last seen state");
                return None;
            }
        };
        let seen = map
            .get(LAST_SEEN_KEY)
            .and_then(|v| LastSeen::from_value(v, now_ms()));
        if seen.is_none() {
            debug!(path = %self.path.display(), "no valid last-seen entry");
        }
        seen
    }

    /// Records `slug` as last seen now. Blank slugs are ignored (`Ok(None)`).
    ///
    /// A state file that cannot be read or holds a non-object is left alone
    /// and reported; only a missing or non-JSON file starts a fresh object.
    pub fn write(&self, kind: SeenKind, slug: &str) -> Result<Option<LastSeen>, LastSeenError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Ok(None);
        }
        let next = LastSeen {
            kind,
            slug: slug.to_string(),
            at: now_ms(),
        };
        let mut map = self.load_map()?.unwrap_or_default();
        map.insert(LAST_SEEN_KEY.to_string(), serde_json::to_value(&next)?);
        self.store_map(&map)?;
        debug!(href = %next.href(), "last seen updated");
        Ok(Some(next))
    }

    /// Like [`LastSeenStore::write`], logging instead of returning failures.
    pub fn remember(&self, kind: SeenKind, slug: &str) {
        if let Err(e) = self.write(kind, slug) {
            warn!(error = %e, "failed to remember last seen entry");
        }
    }

    /// Removes the marker, keeping other keys.
    pub fn clear(&self) -> Result<(), LastSeenError> {
        let Some(mut map) = self.load_map()? else {
            return Ok(());
        };
        if map.remove(LAST_SEEN_KEY).is_some() {
            self.store_map(&map)?;
        }
        Ok(())
    }

    /// `Ok(None)` for a missing file or a body that is not JSON at all.
    fn load_map(&self) -> Result<Option<Map<String, Value>>, LastSeenError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(LastSeenError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(_) => Err(LastSeenError::NotAnObject {
                path: self.path.clone(),
            }),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "state file is not valid JSON");
                Ok(None)
            }
        }
    }

    /// Writes via a temp file and rename so readers never see a partial file.
    fn store_map(&self, map: &Map<String, Value>) -> Result<(), LastSeenError> {
        let io_err = |source| LastSeenError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(map)?;
        fs::write(&tmp, body).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> LastSeenStore {
        LastSeenStore::new(tmp.path().join("state").join("last_seen.json"))
    }

    #[test]
    fn test_missing_file_reads_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(store(&tmp).read(), None);
    }

    #[test]
    fn test_write_then_read() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        let written = s.write(SeenKind::Project, "  ttak ").unwrap().unwrap();
        assert_eq!(written.slug, "ttak");

        let read = s.read().unwrap();
        assert_eq!(read, written);
        assert_eq!(read.href(), "/contents/ttak");
    }

    #[test]
    fn test_blank_slug_ignored() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        assert_eq!(s.write(SeenKind::Patch, "   ").unwrap(), None);
        assert!(!s.path().exists());
    }

    #[test]
    fn test_other_keys_preserved_and_clear() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        fs::create_dir_all(s.path().parent().unwrap()).unwrap();
        fs::write(s.path(), r#"{"theme":"dark"}"#).unwrap();

        s.write(SeenKind::Patch, "p1").unwrap();
        let raw: Value = serde_json::from_str(&fs::read_to_string(s.path()).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw[LAST_SEEN_KEY]["type"], "patch");

        s.clear().unwrap();
        assert_eq!(s.read(), None);
        let raw: Value = serde_json::from_str(&fs::read_to_string(s.path()).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn test_from_value_validation() {
        let now = 42;
        assert_eq!(LastSeen::from_value(&json!(null), now), None);
        assert_eq!(LastSeen::from_value(&json!({"type": "blog", "slug": "x"}), now), None);
        assert_eq!(LastSeen::from_value(&json!({"type": "patch", "slug": 3}), now), None);
        assert_eq!(LastSeen::from_value(&json!({"type": "patch", "slug": "  "}), now), None);

        let seen = LastSeen::from_value(&json!({"type": "patch", "slug": " p1 ", "at": -5}), now)
            .unwrap();
        assert_eq!(seen.slug, "p1");
        assert_eq!(seen.at, now);

        let stored = json!({"type": "project", "slug": "a", "at": 1000});
        let seen = LastSeen::from_value(&stored, now).unwrap();
        assert_eq!(seen.at, 1000);
    }

    #[test]
    fn test_malformed_file_reads_none() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        fs::create_dir_all(s.path().parent().unwrap()).unwrap();
        fs::write(s.path(), "not json").unwrap();
        assert_eq!(s.read(), None);
        // writing over garbage starts a fresh object
        s.write(SeenKind::Project, "chop").unwrap();
        assert_eq!(s.read().unwrap().slug, "chop");
    }

    #[test]
    fn test_non_object_state_is_not_overwritten() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        fs::create_dir_all(s.path().parent().unwrap()).unwrap();
        fs::write(s.path(), "[1,2]").unwrap();

        assert_eq!(s.read(), None);
        assert!(matches!(
            s.write(SeenKind::Project, "chop"),
            Err(LastSeenError::NotAnObject { .. })
        ));
        assert!(s.clear().is_err());
        s.remember(SeenKind::Project, "chop");
        assert_eq!(fs::read_to_string(s.path()).unwrap(), "[1,2]");
    }

    #[test]
    fn test_unreadable_state_is_reported() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        // a directory where the file should be fails to read with a non-NotFound error
        fs::create_dir_all(s.path()).unwrap();

        assert_eq!(s.read(), None);
        assert!(matches!(
            s.write(SeenKind::Patch, "p1"),
            Err(LastSeenError::Io { .. })
        ));
        assert!(s.path().is_dir());
    }

    #[test]
    fn test_label_and_href() {
        let seen = LastSeen {
            kind: SeenKind::Project,
            slug: "chop".to_string(),
            at: 1_769_844_000_000,
        };
        assert_eq!(seen.label(), "project:chop · 2026.01.31 16:20");
        let patch = LastSeen {
            kind: SeenKind::Patch,
            ..seen
        };
        assert_eq!(patch.href(), "/patch-notes/chop");
    }
}
