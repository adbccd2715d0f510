//! URL origin and domain extraction shared by the store clients.

/// Extracts the scheme+host origin from a configured store URL.
///
/// Given `"https://greenhaus.myshopify.com/collections/all"`, returns
/// `"https://greenhaus.myshopify.com"`, so product endpoints are always built
/// from the store root.
#[must_use]
pub fn extract_store_origin(store_url: &str) -> String {
    reqwest::Url::parse(store_url).map_or_else(
        |e| {
            tracing::warn!(
                store_url,
                error = %e,
                "could not parse store URL; falling back to string split for origin extraction"
            );
            store_url
                .trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

/// Extracts the hostname for error messages, falling back to the raw URL.
pub(super) fn extract_domain(store_url: &str) -> String {
    reqwest::Url::parse(store_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| store_url.to_owned())
}
