//! Shared formatting helpers for CLI output and TUI widgets.
//!
//! All pure formatting functions (no ratatui styles, no UI layout) live here.

use chrono::{DateTime, FixedOffset, Utc};

/// Offset used for human-readable timestamps (KST, UTC+09:00).
const DISPLAY_OFFSET_SECS: i32 = 9 * 3600;

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Format epoch milliseconds as `"YYYY.MM.DD HH:MM"` in KST.
///
/// Out-of-range values render as `"-"`.
pub fn format_kst(epoch_ms: i64) -> String {
    let Some(offset) = FixedOffset::east_opt(DISPLAY_OFFSET_SECS) else {
        return "-".to_string();
    };
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(utc) => utc.with_timezone(&offset).format("%Y.%m.%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Current time as epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

// ---------------------------------------------------------------------------
// Text normalization
// ---------------------------------------------------------------------------

/// Trimmed copy of an optional string; `None` becomes empty.
pub fn safe_text(v: Option<&str>) -> &str {
    v.map(str::trim).unwrap_or("")
}

/// Truncate string to `max_chars` characters with unicode ellipsis (`…`).
///
/// Counts chars, not bytes, so multi-byte titles never split mid-codepoint.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Normalize text for single-line display with space collapsing.
pub fn normalize_for_display(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        let ch = if matches!(ch, '\n' | '\t') { ' ' } else { ch };
        if ch == '\r' {
            continue;
        }
        if ch == ' ' {
            if !prev_space {
                result.push(ch);
            }
            prev_space = true;
        } else {
            result.push(ch);
            prev_space = false;
        }
    }
    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kst_shifts_nine_hours() {
        // 2026-01-31T07:20:00Z
        assert_eq!(format_kst(1_769_844_000_000), "2026.01.31 16:20");
    }

    #[test]
    fn test_format_kst_out_of_range() {
        assert_eq!(format_kst(i64::MAX), "-");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("프로젝트 목록", 4), "프로젝…");
        assert_eq!(truncate("abcdef", 3), "ab…");
    }

    #[test]
    fn test_normalize_for_display() {
        assert_eq!(normalize_for_display("  a\n\nb\t c\r\n"), "a b c");
    }

    #[test]
    fn test_safe_text() {
        assert_eq!(safe_text(Some("  role ")), "role");
        assert_eq!(safe_text(None), "");
    }
}
