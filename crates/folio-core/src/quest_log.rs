//! "Quest Log" sections parsed into cards.
//!
//! A content body may contain a section like:
//!
//! ```text
//! Quest Log:
//! - **[Auth] Fix cookie persistence**
//!   - domain/subdomain, credentials, CORS cleanup
//! - **[Analytics] Dwell time and funnel**
//!   - active/total time + 5-click
//!
//! ## Next section
//! ```
//!
//! Each top-level bullet becomes a [`QuestCard`]; indented sub-bullets are
//! joined into its description. The section ends at the next heading.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").expect("valid regex"));
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s+").expect("valid regex"));
static TOP_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s+(.*)$").expect("valid regex"));
static SUB_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s{2,}-\s+(.*)$").expect("valid regex"));
static TAGGED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.+?)\]\s*(.+)$").expect("valid regex"));

/// A single quest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestCard {
    /// `"<position>-<title>"`, unique within one parse.
    pub id: String,
    /// Bracketed prefix such as `Auth` in `[Auth] Fix login`.
    pub tag: Option<String>,
    pub title: String,
    /// Sub-bullets joined with single spaces.
    pub desc: Option<String>,
}

/// Removes a leading bullet marker and inline bold/code markers.
fn strip_md(s: &str) -> String {
    let s = s.trim_start();
    let s = s
        .strip_prefix("- ")
        .or_else(|| s.strip_prefix("* "))
        .map(str::trim_start)
        .unwrap_or(s);
    let s = BOLD.replace_all(s, "$1");
    let s = CODE.replace_all(&s, "$1");
    s.trim().to_string()
}

fn is_sub_bullet(line: &str) -> bool {
    SUB_BULLET.is_match(line)
}

fn is_top_bullet(line: &str) -> bool {
    TOP_BULLET.is_match(line) && !is_sub_bullet(line)
}

/// Parses the quest log section of `content`; no section yields no cards.
pub fn parse_quest_log(content: &str) -> Vec<QuestCard> {
    let lines: Vec<&str> = content.lines().collect();

    let Some(start) = lines
        .iter()
        .position(|l| l.trim().to_lowercase().starts_with("quest log"))
    else {
        return Vec::new();
    };

    let scope: Vec<&str> = lines[start + 1..]
        .iter()
        .take_while(|l| !HEADING.is_match(l.trim()))
        .filter(|l| !l.trim().is_empty())
        .copied()
        .collect();

    let mut cards = Vec::new();
    let mut i = 0;
    while i < scope.len() {
        let top = match TOP_BULLET.captures(scope[i]) {
            Some(top) if is_top_bullet(scope[i]) => top,
            _ => {
                i += 1;
                continue;
            }
        };
        let raw_title = strip_md(&top[1]);

        let (tag, title) = match TAGGED.captures(&raw_title) {
            Some(m) => (Some(m[1].trim().to_string()), m[2].trim().to_string()),
            None => (None, raw_title.clone()),
        };

        let mut desc_lines = Vec::new();
        let mut j = i + 1;
        while j < scope.len() && !is_top_bullet(scope[j]) {
            if let Some(sub) = SUB_BULLET.captures(scope[j]) {
                desc_lines.push(strip_md(&sub[1]));
            }
            j += 1;
        }

        cards.push(QuestCard {
            id: format!("{}-{}", cards.len(), title),
            tag,
            title,
            desc: (!desc_lines.is_empty()).then(|| desc_lines.join(" ")),
        });
        i = j;
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Intro paragraph.

Quest Log:
- **[Auth] Fix cookie persistence**
  - domain/subdomain, `credentials`, CORS
  - retested on Safari

- **[Analytics] Dwell time**
  - active/total + 5-click
- Plain quest without tag
continuation line ignored

## Retrospective
- not a quest
";

    #[test]
    fn test_parse_sample() {
        let cards = parse_quest_log(SAMPLE);
        assert_eq!(cards.len(), 3);

        assert_eq!(cards[0].id, "0-Fix cookie persistence");
        assert_eq!(cards[0].tag.as_deref(), Some("Auth"));
        assert_eq!(cards[0].title, "Fix cookie persistence");
        assert_eq!(
            cards[0].desc.as_deref(),
            Some("domain/subdomain, credentials, CORS retested on Safari")
        );

        assert_eq!(cards[1].tag.as_deref(), Some("Analytics"));
        assert_eq!(cards[1].desc.as_deref(), Some("active/total + 5-click"));

        assert_eq!(cards[2].id, "2-Plain quest without tag");
        assert_eq!(cards[2].tag, None);
        assert_eq!(cards[2].desc, None);
    }

    #[test]
    fn test_no_section() {
        assert!(parse_quest_log("# Title\n- item\n").is_empty());
        assert!(parse_quest_log("").is_empty());
    }

    #[test]
    fn test_header_is_case_insensitive() {
        let cards = parse_quest_log("  QUEST LOG\n- `one`\n");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "one");
    }

    #[test]
    fn test_section_ends_at_heading() {
        let cards = parse_quest_log("Quest log:\n### Done\n- hidden\n");
        assert!(cards.is_empty());
    }

    #[test]
    fn test_indented_bullet_before_first_quest_is_skipped() {
        let body = "Quest Log\n  - orphan detail\n - one space\n  - its detail\n";
        let cards = parse_quest_log(body);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "one space");
        assert_eq!(cards[0].desc.as_deref(), Some("its detail"));
    }

    #[test]
    fn test_strip_md() {
        assert_eq!(strip_md("- **bold** and `code`"), "bold and code");
        assert_eq!(strip_md("* item"), "item");
    }
}
