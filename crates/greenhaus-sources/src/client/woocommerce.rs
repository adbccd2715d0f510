//! Client for the WooCommerce Store API (`/wp-json/wc/store/v1/products`).

use reqwest::Client;
use serde_json::Value;

use crate::error::SourceError;
use crate::pagination::{parse_total_pages, woo_has_next_page};
use crate::rate_limit::retry_with_backoff;
use crate::types::{decode_each, WooProduct};

use super::origin::extract_store_origin;
use super::{build_http_client, classify_response, read_json, ClientOptions, MAX_PAGES};

const PRODUCTS_PATH: &str = "/wp-json/wc/store/v1/products";
const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// Consumer key pair for stores that restrict the Store API.
#[derive(Clone)]
pub struct WooCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl std::fmt::Debug for WooCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooCredentials")
            .field("consumer_key", &"[redacted]")
            .field("consumer_secret", &"[redacted]")
            .finish()
    }
}

/// One decoded page. `received` counts the records the store sent, including
/// any that failed to decode, so short-page detection sees the real size.
struct WooPage {
    products: Vec<WooProduct>,
    total_pages: Option<u32>,
    received: usize,
}

/// Pages through a WooCommerce store's public product listing.
pub struct WooCommerceClient {
    client: Client,
    store_url: String,
    credentials: Option<WooCredentials>,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl WooCommerceClient {
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        store_url: &str,
        credentials: Option<WooCredentials>,
        options: &ClientOptions,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            client: build_http_client(options)?,
            store_url: store_url.to_owned(),
            credentials,
            max_retries: options.max_retries,
            backoff_base_secs: options.backoff_base_secs,
        })
    }

    #[must_use]
    pub fn store_url(&self) -> &str {
        &self.store_url
    }

    /// Fetches one 1-based page, returning its products and the
    /// `X-WP-TotalPages` value when the host reports it.
    ///
    /// # Errors
    ///
    /// Same classification as [`super::ShopifyClient::fetch_products_page`].
    pub async fn fetch_products_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<(Vec<WooProduct>, Option<u32>), SourceError> {
        let page = self.fetch_page(page, per_page).await?;
        Ok((page.products, page.total_pages))
    }

    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<WooPage, SourceError> {
        let url = Self::products_url(&self.store_url, page, per_page)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let mut request = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "application/json");

                if let Some(creds) = &self.credentials {
                    request =
                        request.basic_auth(&creds.consumer_key, Some(&creds.consumer_secret));
                }

                let response = classify_response(request.send().await?, &self.store_url, &url)?;

                let total_pages = parse_total_pages(
                    response
                        .headers()
                        .get(TOTAL_PAGES_HEADER)
                        .and_then(|v| v.to_str().ok()),
                );

                let context = format!("products page {page} from {}", self.store_url);
                let records: Vec<Value> = read_json(response, || context.clone()).await?;
                let received = records.len();

                Ok(WooPage {
                    products: decode_each(records, &context),
                    total_pages,
                    received,
                })
            }
        })
        .await
    }

    /// Fetches every product, stopping at the reported page count or at the
    /// first short page.
    ///
    /// # Errors
    ///
    /// Propagates any page error; returns [`SourceError::PaginationLimit`]
    /// past [`MAX_PAGES`].
    pub async fn fetch_all_products(&self, per_page: u32) -> Result<Vec<WooProduct>, SourceError> {
        let mut all_products = Vec::new();

        for page in 1..=MAX_PAGES {
            let WooPage {
                products,
                total_pages,
                received,
            } = self.fetch_page(page, per_page).await?;
            all_products.extend(products);

            if !woo_has_next_page(page, total_pages, received, per_page) {
                tracing::debug!(
                    store_url = %self.store_url,
                    count = all_products.len(),
                    "fetched woocommerce catalog"
                );
                return Ok(all_products);
            }
        }

        Err(SourceError::PaginationLimit {
            store_url: self.store_url.clone(),
            max_pages: MAX_PAGES,
        })
    }

    /// # Errors
    ///
    /// Returns [`SourceError::InvalidStoreUrl`] if the extracted origin is not
    /// a valid URL base.
    pub(super) fn products_url(
        store_url: &str,
        page: u32,
        per_page: u32,
    ) -> Result<String, SourceError> {
        let origin = extract_store_origin(store_url);
        let mut url = reqwest::Url::parse(&format!("{origin}{PRODUCTS_PATH}")).map_err(|e| {
            SourceError::InvalidStoreUrl {
                store_url: store_url.to_owned(),
                reason: format!("origin \"{origin}\" is not a valid URL base: {e}"),
            }
        })?;

        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());

        Ok(url.to_string())
    }
}
