//! Low-level field parsing used by [`crate::normalize`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tag regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Parses a decimal price string, tolerating a leading currency symbol and
/// thousands separators (`"$1,250.00"`).
#[must_use]
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses a price that may arrive as a JSON number or a numeric string.
#[must_use]
pub(crate) fn parse_price_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Converts a minor-unit amount (`"3500"`, minor unit 2) to a decimal price.
#[must_use]
pub(crate) fn parse_minor_units(raw: &str, minor_unit: u32) -> Option<f64> {
    let amount = raw.trim().parse::<i64>().ok()?;
    let divisor = 10_f64.powi(i32::try_from(minor_unit.min(6)).ok()?);
    #[allow(clippy::cast_precision_loss)]
    Some(amount as f64 / divisor)
}

/// Renders a JSON id (string or number) as a string.
#[must_use]
pub(crate) fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Strips HTML tags and collapses whitespace. Returns `None` when nothing
/// readable remains.
#[must_use]
pub(crate) fn strip_html(html: &str) -> Option<String> {
    let text = HTML_TAG.replace_all(html, " ");
    let text = text
        .replace("&amp;", "&")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">");
    let collapsed = WHITESPACE.replace_all(text.trim(), " ").into_owned();
    (!collapsed.is_empty()).then_some(collapsed)
}

/// Returns the values of `key:value` (or `key=value`) tags, matching the key
/// case-insensitively.
#[must_use]
pub(crate) fn tag_values(tags: &[String], key: &str) -> Vec<String> {
    tags.iter()
        .filter_map(|tag| {
            let (tag_key, value) = tag.split_once([':', '='])?;
            let value = value.trim();
            (tag_key.trim().eq_ignore_ascii_case(key) && !value.is_empty())
                .then(|| value.to_owned())
        })
        .collect()
}

/// First value of a `key:value` tag.
#[must_use]
pub(crate) fn tag_value(tags: &[String], key: &str) -> Option<String> {
    tag_values(tags, key).into_iter().next()
}

/// URL-safe slug used when a record carries no usable id.
#[must_use]
pub(crate) fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
