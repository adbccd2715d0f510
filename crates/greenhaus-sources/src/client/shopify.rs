//! Client for Shopify's public `products.json` endpoint.

use reqwest::Client;

use crate::error::SourceError;
use crate::pagination::next_shopify_cursor;
use crate::rate_limit::retry_with_backoff;
use crate::types::{ShopifyProduct, ShopifyProductsResponse};

use super::origin::extract_store_origin;
use super::{build_http_client, classify_response, read_json, ClientOptions, MAX_PAGES};

/// Pages through a Shopify storefront's catalog.
///
/// Pagination cursors come from the `Link` header. Transient errors (429,
/// network failures, 5xx) are retried with exponential backoff.
pub struct ShopifyClient {
    client: Client,
    store_url: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl ShopifyClient {
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(store_url: &str, options: &ClientOptions) -> Result<Self, SourceError> {
        Ok(Self {
            client: build_http_client(options)?,
            store_url: store_url.to_owned(),
            max_retries: options.max_retries,
            backoff_base_secs: options.backoff_base_secs,
        })
    }

    #[must_use]
    pub fn store_url(&self) -> &str {
        &self.store_url
    }

    /// Fetches one page of products, returning the page and the raw `Link`
    /// header for cursor extraction.
    ///
    /// # Errors
    ///
    /// - [`SourceError::RateLimited`]: HTTP 429 after all retries.
    /// - [`SourceError::NotFound`]: HTTP 404 (not retried).
    /// - [`SourceError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`SourceError::Http`]: network failure after all retries.
    /// - [`SourceError::Deserialize`]: body is not a products page.
    /// - [`SourceError::InvalidStoreUrl`]: the store URL has no usable origin.
    pub async fn fetch_products_page(
        &self,
        limit: u32,
        page_info: Option<&str>,
    ) -> Result<(ShopifyProductsResponse, Option<String>), SourceError> {
        let url = Self::products_url(&self.store_url, limit, page_info)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let response = classify_response(response, &self.store_url, &url)?;

                // Grab the Link header before the body consumes the response.
                let link_header = response
                    .headers()
                    .get(reqwest::header::LINK)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);

                let page: ShopifyProductsResponse = read_json(response, || {
                    format!("products page from {}", self.store_url)
                })
                .await?;

                Ok((page, link_header))
            }
        })
        .await
    }

    /// Fetches every product by following `Link` cursors until no
    /// `rel="next"` remains.
    ///
    /// All-or-nothing: a failing page discards earlier pages and returns the
    /// error, so the aggregator never mixes a partial store into the catalog.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_products_page`]; returns
    /// [`SourceError::PaginationLimit`] past [`MAX_PAGES`].
    pub async fn fetch_all_products(&self, limit: u32) -> Result<Vec<ShopifyProduct>, SourceError> {
        let mut all_products = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let (page, link_header) = self.fetch_products_page(limit, cursor.as_deref()).await?;
            all_products.extend(page.products);

            cursor = next_shopify_cursor(link_header.as_deref());
            if cursor.is_none() {
                tracing::debug!(
                    store_url = %self.store_url,
                    count = all_products.len(),
                    "fetched shopify catalog"
                );
                return Ok(all_products);
            }
        }

        Err(SourceError::PaginationLimit {
            store_url: self.store_url.clone(),
            max_pages: MAX_PAGES,
        })
    }

    /// Builds the `products.json` URL for the given store, page size, and
    /// optional cursor.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidStoreUrl`] if the extracted origin is not
    /// a valid URL base.
    pub(super) fn products_url(
        store_url: &str,
        limit: u32,
        page_info: Option<&str>,
    ) -> Result<String, SourceError> {
        let origin = extract_store_origin(store_url);
        let base = format!("{origin}/products.json");
        let mut url = reqwest::Url::parse(&base).map_err(|e| SourceError::InvalidStoreUrl {
            store_url: store_url.to_owned(),
            reason: format!("origin \"{origin}\" is not a valid URL base: {e}"),
        })?;

        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        if let Some(cursor) = page_info {
            url.query_pairs_mut().append_pair("page_info", cursor);
        }

        Ok(url.to_string())
    }
}
