//! Image reference repair shared by every product origin.
//!
//! All functions here are total: malformed input degrades to
//! [`PLACEHOLDER_IMAGE`] and never panics. Every returned path starts with
//! `/` or `http`.

use greenhaus_core::PLACEHOLDER_IMAGE;
use serde_json::Value;

/// Build-artifact prefix that leaks into hand-written catalog entries.
const BUILD_PREFIX: &str = "public/";

/// Repairs a single image reference.
///
/// - `http://` / `https://` URLs are kept, with the scheme lowercased.
/// - A leading `public/` (or `/public/`) is stripped to a root-relative path.
/// - Paths without a leading `/` get one.
///
/// Returns `None` for empty or whitespace-only input.
#[must_use]
pub fn resolve_image_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(url) = lowercase_http_scheme(trimmed) {
        return Some(url);
    }

    let stripped = trimmed
        .strip_prefix(BUILD_PREFIX)
        .or_else(|| trimmed.strip_prefix("/public/"))
        .unwrap_or(trimmed);

    if stripped.is_empty() {
        return None;
    }

    if stripped.starts_with('/') {
        Some(stripped.to_owned())
    } else {
        Some(format!("/{stripped}"))
    }
}

/// Resolves the display image for a loosely-typed record: the first usable
/// entry of `images` wins over the legacy singular `image` field.
#[must_use]
pub fn product_image_path(images: &Value, legacy_image: &Value) -> String {
    image_values(images)
        .into_iter()
        .chain(image_values(legacy_image))
        .next()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned())
}

/// Repairs a whole image list, dropping unusable entries. Never returns an
/// empty list.
#[must_use]
pub fn normalize_images<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let images: Vec<String> = paths
        .into_iter()
        .filter_map(|p| resolve_image_path(p.as_ref()))
        .collect();

    if images.is_empty() {
        vec![PLACEHOLDER_IMAGE.to_owned()]
    } else {
        images
    }
}

/// Collects every usable image path from a JSON string or array of strings.
/// Any other JSON type yields nothing.
pub(crate) fn image_values(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => resolve_image_path(s).into_iter().collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(resolve_image_path)
            .collect(),
        _ => Vec::new(),
    }
}

fn lowercase_http_scheme(s: &str) -> Option<String> {
    ["https://", "http://"].into_iter().find_map(|scheme| {
        let head = s.get(..scheme.len())?;
        head.eq_ignore_ascii_case(scheme)
            .then(|| format!("{scheme}{}", &s[scheme.len()..]))
    })
}
