//! Conversion from origin-specific records to the canonical [`Product`].
//!
//! Normalization never fails. Missing or malformed fields are replaced with
//! safe defaults (placeholder image, zero price, pass-through category) and
//! logged at `warn`.

use greenhaus_core::{CategoryCatalog, Product, Source};

use crate::images::{image_values, normalize_images, product_image_path};
use crate::local::LocalProduct;
use crate::parse::{
    id_string, parse_decimal, parse_minor_units, parse_price_value, slugify, strip_html,
    tag_value, tag_values,
};
use crate::types::{RawProduct, ShopifyProduct, WooAttribute, WooProduct};

/// Normalizes any raw record into a [`Product`], reconciling its category
/// against `categories`.
#[must_use]
pub fn normalize_product(raw: RawProduct, categories: &CategoryCatalog) -> Product {
    let source = raw.source();
    let mut product = match raw {
        RawProduct::Local(p) => normalize_local(p, source),
        RawProduct::WooCommerce(p) => normalize_woocommerce(p),
        RawProduct::Shopify(p) => normalize_shopify(p),
    };
    product.category = categories.reconcile(&product.category);
    product
}

fn normalize_local(product: LocalProduct, source: Source) -> Product {
    let id = id_string(&product.id).unwrap_or_else(|| {
        let fallback = format!("{source}-{}", slugify(&product.name));
        tracing::warn!(
            %source,
            name = %product.name,
            fallback_id = %fallback,
            "local product has no usable id; deriving one from its name"
        );
        fallback
    });

    let price = checked_price(parse_price_value(&product.price), &id, source);

    // The first usable entry of `images` leads; the rest of the list follows.
    let primary = product_image_path(&product.images, &product.image);
    let mut images = vec![primary];
    images.extend(image_values(&product.images).into_iter().skip(1));
    images.dedup();
    if is_malformed_image_field(&product.images) || is_malformed_image_field(&product.image) {
        tracing::warn!(%source, product_id = %id, "ignoring malformed image field");
    }

    Product {
        name: product_name(product.name, &id, source),
        id,
        price,
        category: product.category.unwrap_or_default(),
        images,
        thc: non_empty(product.thc),
        cbd: non_empty(product.cbd),
        description: non_empty(product.description),
        effects: product.effects,
        benefits: product.benefits,
        usage: non_empty(product.usage),
        strain: non_empty(product.strain),
        origin: non_empty(product.origin),
        source,
    }
}

fn normalize_woocommerce(product: WooProduct) -> Product {
    let id = product.id.to_string();

    let price = checked_price(
        product
            .prices
            .as_ref()
            .and_then(|p| parse_minor_units(&p.price, p.currency_minor_unit)),
        &id,
        Source::WooCommerce,
    );

    let description = product
        .description
        .as_deref()
        .and_then(strip_html)
        .or_else(|| product.short_description.as_deref().and_then(strip_html));

    let category = product
        .categories
        .iter()
        .map(|c| c.name.trim())
        .find(|n| !n.is_empty())
        .map(str::to_owned)
        .unwrap_or_default();

    let attr = |name: &str| attribute_terms(&product.attributes, name);

    Product {
        images: normalize_images(product.images.iter().map(|i| i.src.as_str())),
        thc: attr("thc").into_iter().next(),
        cbd: attr("cbd").into_iter().next(),
        strain: attr("strain").into_iter().next(),
        origin: attr("origin").into_iter().next(),
        usage: attr("usage").into_iter().next(),
        effects: attr("effects"),
        benefits: attr("benefits"),
        name: product_name(product.name, &id, Source::WooCommerce),
        id,
        price,
        category,
        description,
        source: Source::WooCommerce,
    }
}

fn normalize_shopify(product: ShopifyProduct) -> Product {
    let id = product.id.to_string();

    // The cheapest variant is the "from" price shown on product cards.
    let min_variant_price = product
        .variants
        .iter()
        .filter_map(|v| parse_decimal(&v.price))
        .reduce(f64::min);
    let price = checked_price(min_variant_price, &id, Source::Shopify);

    let mut images = product.images;
    images.sort_by_key(|i| i.position.unwrap_or(i32::MAX));

    let category = product
        .product_type
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_default();

    Product {
        images: normalize_images(images.iter().map(|i| i.src.as_str())),
        thc: tag_value(&product.tags, "thc"),
        cbd: tag_value(&product.tags, "cbd"),
        strain: tag_value(&product.tags, "strain"),
        origin: tag_value(&product.tags, "origin"),
        usage: tag_value(&product.tags, "usage"),
        effects: tag_values(&product.tags, "effect"),
        benefits: tag_values(&product.tags, "benefit"),
        description: product.body_html.as_deref().and_then(strip_html),
        name: product_name(product.title, &id, Source::Shopify),
        id,
        price,
        category,
        source: Source::Shopify,
    }
}

/// Terms of the attribute named `name` (case-insensitive).
fn attribute_terms(attributes: &[WooAttribute], name: &str) -> Vec<String> {
    attributes
        .iter()
        .filter(|a| a.name.trim().eq_ignore_ascii_case(name))
        .flat_map(|a| a.terms.iter().map(|t| t.name.trim().to_owned()))
        .filter(|t| !t.is_empty())
        .collect()
}

fn checked_price(price: Option<f64>, id: &str, source: Source) -> f64 {
    match price {
        Some(p) if p >= 0.0 => p,
        Some(p) => {
            tracing::warn!(%source, product_id = id, price = p, "negative price; clamping to 0");
            0.0
        }
        None => {
            tracing::warn!(%source, product_id = id, "missing or unparsable price; defaulting to 0");
            0.0
        }
    }
}

fn product_name(name: String, id: &str, source: Source) -> String {
    if name.trim().is_empty() {
        tracing::warn!(%source, product_id = id, "product has no name; using its id");
        id.to_owned()
    } else {
        name
    }
}

fn is_malformed_image_field(value: &serde_json::Value) -> bool {
    !(value.is_null() || value.is_string() || value.is_array())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
