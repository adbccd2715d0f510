//! Potency label parsing.
//!
//! Catalog potency values are free text: `"22%"`, `"18-22%"`, `"< 0.3%"`,
//! `"10mg per piece"`. The THC slider needs a single number per product.

use std::sync::LazyLock;

use regex::Regex;

/// Value assigned to "below detection" labels such as `"< 0.2%"`.
pub const BELOW_DETECTION: f64 = 0.1;

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*-\s*(\d+(?:\.\d+)?)").expect("valid regex")
});

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d*)?|\.\d+)").expect("valid regex"));

/// Parses a THC label into a number.
///
/// - `"A-B%"` is the mean of `A` and `B`.
/// - Anything containing `<` is [`BELOW_DETECTION`].
/// - `"10mg per piece"` and plain values use the leading number.
/// - Absent or unparsable labels are `0`.
#[must_use]
pub fn parse_thc(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };

    if let Some(caps) = RANGE.captures(raw) {
        let low = caps[1].parse::<f64>().unwrap_or(0.0);
        let high = caps[2].parse::<f64>().unwrap_or(0.0);
        return (low + high) / 2.0;
    }

    if raw.contains('<') {
        return BELOW_DETECTION;
    }

    // Per-piece doses are milligrams per unit; only the number is kept.
    leading_number(raw).unwrap_or(0.0)
}

/// CBD labels follow the same conventions as THC.
#[must_use]
pub fn parse_cbd(raw: Option<&str>) -> f64 {
    parse_thc(raw)
}

fn leading_number(raw: &str) -> Option<f64> {
    LEADING_NUMBER
        .captures(raw)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|n| n.is_finite())
}
