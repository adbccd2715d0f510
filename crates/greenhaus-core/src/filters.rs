use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::products::Product;

/// Lower bound of the THC slider, in percent.
pub const THC_MIN: f64 = 0.0;
/// Upper bound of the THC slider, in percent.
pub const THC_MAX: f64 = 30.0;

/// Inclusive numeric range selected on a slider.
///
/// `min <= max` is maintained by the slider control; [`Range::contains`]
/// does not reorder or clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// No popularity metric exists, so input order is kept.
    #[default]
    Popularity,
    PriceAsc,
    PriceDesc,
    ThcDesc,
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortBy::Popularity => write!(f, "popularity"),
            SortBy::PriceAsc => write!(f, "price-asc"),
            SortBy::PriceDesc => write!(f, "price-desc"),
            SortBy::ThcDesc => write!(f, "thc-desc"),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(SortBy::Popularity),
            "price-asc" => Ok(SortBy::PriceAsc),
            "price-desc" => Ok(SortBy::PriceDesc),
            "thc-desc" => Ok(SortBy::ThcDesc),
            other => Err(format!(
                "unknown sort order '{other}'; expected popularity, price-asc, price-desc or thc-desc"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub thc_range: Range,
    pub price_range: Range,
    pub sort_by: SortBy,
}

impl FilterOptions {
    /// Default options with the price slider spanning `[0, max_price]`.
    #[must_use]
    pub fn with_max_price(max_price: f64) -> Self {
        Self {
            thc_range: Range::new(THC_MIN, THC_MAX),
            price_range: Range::new(0.0, max_price),
            sort_by: SortBy::Popularity,
        }
    }

    /// Default options sized to the loaded catalog.
    #[must_use]
    pub fn for_catalog(products: &[Product]) -> Self {
        Self::with_max_price(max_price(products))
    }
}

/// Upper bound for the price slider: the highest catalog price rounded up,
/// never below 1.
#[must_use]
pub fn max_price(products: &[Product]) -> f64 {
    products
        .iter()
        .map(|p| p.price)
        .filter(|p| p.is_finite())
        .fold(1.0_f64, f64::max)
        .ceil()
}
