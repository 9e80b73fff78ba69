//! Field coercion for TheAudioDB payloads
//!
//! The catalog returns numbers as strings, `null`, empty strings, the text
//! `"null"` or floats depending on the record. Everything that leaves this
//! crate goes through these helpers, so callers only ever see typed values.

use serde_json::Value;

/// Placeholder for descriptive fields the catalog left empty
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder text the catalog uses instead of an empty biography
const BIOGRAPHY_PLACEHOLDER: &str = "No biography available.";

/// Biographies at or below this length are treated as missing
const MIN_BIOGRAPHY_LENGTH: usize = 10;

/// Coerce a raw numeric field into a non-negative integer
///
/// Absent, `null`, `""`, `"0"`, `0`, `"null"`, unparsable, negative and
/// non-finite values all map to 0. Floating-point representations are
/// truncated (`"12.7"` becomes 12).
pub fn coerce_int(value: Option<&Value>) -> u64 {
    let parsed = match value {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => return v,
            None => n.as_f64(),
        },
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        _ => 0,
    }
}

/// Coerce a raw numeric field into a year (0 when unknown)
pub fn coerce_year(value: Option<&Value>) -> u32 {
    u32::try_from(coerce_int(value)).unwrap_or(0)
}

/// Coerce a raw numeric field that must fit in `u32`, saturating
pub fn coerce_count(value: Option<&Value>) -> u32 {
    u32::try_from(coerce_int(value)).unwrap_or(u32::MAX)
}

/// Coerce a raw textual field, substituting `placeholder` when missing
///
/// Numbers are rendered as text; `null`, blank strings and other JSON
/// types yield the placeholder.
pub fn coerce_text(value: Option<&Value>, placeholder: &str) -> String {
    coerce_optional_text(value).unwrap_or_else(|| placeholder.to_string())
}

/// Coerce a raw textual field, keeping absence visible as `None`
pub fn coerce_optional_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce an optional link field; blank values become `None`
pub fn coerce_url(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Coerce a catalog identifier, which may arrive as a string or a number
pub fn coerce_id(value: Option<&Value>) -> Option<String> {
    coerce_optional_text(value)
}

/// Split a comma-separated style list into trimmed, non-empty tags
pub fn split_styles(style: Option<&str>) -> Vec<String> {
    style
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collapse whitespace in a biography and drop placeholder text
pub fn clean_biography(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed == BIOGRAPHY_PLACEHOLDER || collapsed.chars().count() <= MIN_BIOGRAPHY_LENGTH {
        return String::new();
    }
    collapsed
}
