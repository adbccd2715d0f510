//! The storefront's own catalog, shipped as a JSON array.
//!
//! Local records are hand-maintained and loosely typed: ids and prices show
//! up as numbers or strings, and image fields have held strings, arrays and
//! the occasional `null` or object. Those fields stay as raw JSON here and
//! are interpreted leniently during normalization.

use std::path::Path;

use greenhaus_core::Source;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::SourceError;
use crate::types::decode_each;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalProduct {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default)]
    pub price: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    /// Legacy single-image field, superseded by `images`.
    #[serde(default)]
    pub image: Value,
    #[serde(default)]
    pub images: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub thc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cbd: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub effects: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub benefits: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub usage: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub strain: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub origin: Option<String>,
    /// `pharmacy` marks dispensary-only items; absent or unknown means `local`.
    #[serde(default, deserialize_with = "lenient_source")]
    pub source: Option<Source>,
}

/// Strings pass through, numbers and booleans are stringified, anything else
/// is treated as absent.
fn scalar_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_string(Value::deserialize(deserializer)?))
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// Accepts an array of scalars or a single scalar.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_string).collect(),
        other => scalar_string(other).into_iter().collect(),
    })
}

fn lenient_source<'de, D>(deserializer: D) -> Result<Option<Source>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// Reads the local catalog file.
///
/// Records are decoded one at a time; an entry that is not a JSON object is
/// logged and skipped so the rest of the catalog still loads.
///
/// # Errors
///
/// - [`SourceError::LocalCatalogIo`]: the file cannot be read.
/// - [`SourceError::Deserialize`]: the file is not a JSON array.
pub async fn load_local_catalog(path: &Path) -> Result<Vec<LocalProduct>, SourceError> {
    let content =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SourceError::LocalCatalogIo {
                path: path.display().to_string(),
                source: e,
            })?;

    let records: Vec<Value> =
        serde_json::from_str(&content).map_err(|e| SourceError::Deserialize {
            context: format!("local catalog {}", path.display()),
            source: e,
        })?;

    let total = records.len();
    let products: Vec<LocalProduct> =
        decode_each(records, &format!("local catalog {}", path.display()));

    tracing::debug!(
        path = %path.display(),
        count = products.len(),
        skipped = total - products.len(),
        "loaded local catalog"
    );
    Ok(products)
}
