use serde::{Deserialize, Serialize};

/// Image shown when a product has no usable image reference.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";

/// Origin of a product record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Local,
    #[serde(rename = "woocommerce")]
    WooCommerce,
    Shopify,
    Pharmacy,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Local => write!(f, "local"),
            Source::WooCommerce => write!(f, "woocommerce"),
            Source::Shopify => write!(f, "shopify"),
            Source::Pharmacy => write!(f, "pharmacy"),
        }
    }
}

/// A catalog product after normalization, ready for filtering and display.
///
/// Every `Product` handed to the filter pipeline has at least one entry in
/// `images` and a non-empty `category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit price in the store currency. Never negative.
    pub price: f64,
    pub category: String,
    /// Root-relative paths or absolute URLs, primary image first.
    pub images: Vec<String>,
    /// Free-text potency, e.g. `"22%"`, `"10-15%"` or `"< 0.2%"`.
    pub thc: Option<String>,
    pub cbd: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub effects: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub usage: Option<String>,
    pub strain: Option<String>,
    pub origin: Option<String>,
    pub source: Source,
}

impl Product {
    /// Returns the image the carousel and product cards lead with.
    #[must_use]
    pub fn primary_image(&self) -> &str {
        self.images
            .first()
            .map_or(PLACEHOLDER_IMAGE, String::as_str)
    }

    /// THC potency is meaningless for accessories; the filter skips them.
    #[must_use]
    pub fn is_accessory(&self) -> bool {
        self.category == "Accessories"
    }
}
