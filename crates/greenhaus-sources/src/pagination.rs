//! Pagination helpers for the two remote commerce platforms.
//!
//! ## Shopify
//!
//! `products.json` pages with a cursor carried in the `Link` response header:
//!
//! ```text
//! <https://shop.com/products.json?limit=100&page_info=PREV>; rel="previous",
//! <https://shop.com/products.json?limit=100&page_info=NEXT>; rel="next"
//! ```
//!
//! ## WooCommerce
//!
//! The Store API pages with `page`/`per_page` query parameters and reports
//! the page count in the `X-WP-TotalPages` header. Some hosts strip that
//! header, so a short page also ends the walk.

/// Extracts the `page_info` cursor of the `rel="next"` link in a Shopify
/// `Link` header.
///
/// Returns `None` on the last page, when the header is absent, or when the
/// next link carries no cursor.
#[must_use]
pub fn next_shopify_cursor(link_header: Option<&str>) -> Option<String> {
    let header = link_header?;

    let segment = header
        .split(',')
        .map(str::trim)
        .find(|segment| segment.contains(r#"rel="next""#))?;

    let url = angle_bracket_url(segment)?;
    query_param(url, "page_info")
}

/// Decides whether another WooCommerce page should be requested after
/// `page` (1-based) returned `received` products.
#[must_use]
pub fn woo_has_next_page(
    page: u32,
    total_pages: Option<u32>,
    received: usize,
    per_page: u32,
) -> bool {
    if received == 0 {
        return false;
    }
    match total_pages {
        Some(total) => page < total,
        None => u32::try_from(received).is_ok_and(|n| n >= per_page),
    }
}

/// Parses the `X-WP-TotalPages` header value.
#[must_use]
pub fn parse_total_pages(header: Option<&str>) -> Option<u32> {
    header?.trim().parse::<u32>().ok()
}

fn angle_bracket_url(segment: &str) -> Option<&str> {
    let start = segment.find('<')? + 1;
    let end = segment.find('>')?;
    if start >= end {
        return None;
    }
    Some(&segment[start..end])
}

/// Cursors are base64url and never need percent-decoding.
fn query_param(url: &str, param: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, value)| *key == param && !value.is_empty())
        .map(|(_, value)| value.to_owned())
}
