//! Front-matter splitting and lenient field decoding.
//!
//! A content file is an optional YAML block fenced by `---` lines followed by
//! the body:
//!
//! ```text
//! ---
//! title: TTAK
//! order: 1
//! ---
//! Body text...
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use super::ContentError;

const FENCE: &str = "---";

/// Splits raw file text into `(yaml, body)`.
///
/// Returns `None` for the YAML part when the text does not open with a fence
/// or the fence is never closed; the whole text is then the body.
pub fn split(raw: &str) -> (Option<&str>, &str) {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some(first_nl) = text.find('\n') else {
        return (None, text);
    };
    if text[..first_nl].trim_end() != FENCE {
        return (None, text);
    }

    let rest = &text[first_nl + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }
    (None, text)
}

/// Decodes a YAML block into `F`; an empty block yields `F::default()`.
pub fn decode<F>(yaml: Option<&str>, path: &std::path::Path) -> Result<F, ContentError>
where
    F: DeserializeOwned + Default,
{
    match yaml {
        Some(y) if !y.trim().is_empty() => {
            serde_yaml::from_str(y).map_err(|source| ContentError::FrontMatter {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Ok(F::default()),
    }
}

/// Accepts strings, numbers and booleans for a string field.
///
/// Authors write `version: 1.2` or `date: 2026-01-31` without quotes; both
/// should land as text rather than fail the whole file.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Accepts integers, floats and numeric strings; anything else is `None`.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::Number(n)) => n.as_f64(),
        Some(serde_yaml::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite()))
}

/// Accepts booleans and `"true"`/`"false"` strings; anything else is `None`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::Bool(b)) => Some(b),
        Some(serde_yaml::Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Like [`lenient_string`] for a required field (missing becomes empty).
pub fn lenient_required_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}
