//! Wire shapes of the remote commerce platforms.
//!
//! ### Shopify (`GET /products.json`)
//! Prices are decimal strings on each variant (`"35.00"`). Potency and strain
//! have no structured fields; stores in scope encode them as tags such as
//! `"thc:22%"`, `"cbd:<0.2%"`, `"strain:Indica"` and `"effect:relaxed"`.
//! `product_type` may be an empty string.
//!
//! ### WooCommerce (`GET /wp-json/wc/store/v1/products`)
//! Prices are integer strings in minor units (`"3500"` with
//! `currency_minor_unit = 2`). Potency, strain and effects are product
//! attributes whose `terms` carry the values.

use greenhaus_core::Source;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::local::LocalProduct;

/// A product record as it arrived from its origin, before normalization.
#[derive(Debug, Clone)]
pub enum RawProduct {
    Local(LocalProduct),
    WooCommerce(WooProduct),
    Shopify(ShopifyProduct),
}

impl RawProduct {
    /// Origin tag the normalized product will carry.
    #[must_use]
    pub fn source(&self) -> Source {
        match self {
            RawProduct::Local(p) => p.source.unwrap_or(Source::Local),
            RawProduct::WooCommerce(_) => Source::WooCommerce,
            RawProduct::Shopify(_) => Source::Shopify,
        }
    }
}

/// Decodes each record on its own, logging and dropping the ones that do not
/// fit `T` so one bad record never costs the rest of its page.
pub(crate) fn decode_each<T>(records: Vec<Value>, context: &str) -> Vec<T>
where
    T: DeserializeOwned,
{
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(context, index, error = %e, "skipping malformed product record");
                None
            }
        })
        .collect()
}

fn lenient_records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(decode_each(Vec::<Value>::deserialize(deserializer)?, "shopify products page"))
}

/// Top-level response from `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct ShopifyProductsResponse {
    #[serde(deserialize_with = "lenient_records")]
    pub products: Vec<ShopifyProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyProduct {
    /// Numeric product ID (e.g. `6789012345678`).
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub handle: String,
    /// Raw HTML description. May be `null` or absent.
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub images: Vec<ShopifyImage>,
    #[serde(default)]
    pub variants: Vec<ShopifyVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyVariant {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    /// Current price as a decimal string (e.g. `"30.00"`).
    #[serde(default)]
    pub price: String,
    /// Defaults to `true` when absent.
    #[serde(default = "default_available")]
    pub available: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyImage {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub position: Option<i32>,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct WooProduct {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub prices: Option<WooPrices>,
    #[serde(default)]
    pub images: Vec<WooImage>,
    #[serde(default)]
    pub categories: Vec<WooCategory>,
    #[serde(default)]
    pub attributes: Vec<WooAttribute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WooPrices {
    /// Current price in minor units, e.g. `"3500"`.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub currency_code: Option<String>,
    /// Number of decimal places in `price`; defaults to 2.
    #[serde(default = "default_minor_unit")]
    pub currency_minor_unit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WooImage {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WooCategory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WooAttribute {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub terms: Vec<WooTerm>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WooTerm {
    #[serde(default)]
    pub name: String,
}

fn default_minor_unit() -> u32 {
    2
}
