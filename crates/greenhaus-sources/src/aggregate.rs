//! Merges every configured product origin into one catalog.
//!
//! Sources are fetched concurrently and merged in a fixed order (local,
//! WooCommerce, Shopify). When an id appears in more than one source the
//! first occurrence wins. A failing source is logged, surfaced as a
//! notification, and skipped; it never aborts the load.

use std::collections::HashSet;
use std::path::PathBuf;

use greenhaus_core::{AppConfig, CategoryCatalog, Product, Source};

use crate::client::{ClientOptions, ShopifyClient, WooCommerceClient, WooCredentials};
use crate::error::SourceError;
use crate::local::load_local_catalog;
use crate::normalize::normalize_product;
use crate::notify::{NotificationLevel, Notifier};
use crate::types::RawProduct;

/// A source that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: Source,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct CatalogLoad {
    pub products: Vec<Product>,
    pub failures: Vec<SourceFailure>,
}

/// Concatenates `batches` in order, keeping only the first product seen for
/// each id.
#[must_use]
pub fn aggregate<I>(batches: I) -> Vec<Product>
where
    I: IntoIterator<Item = Vec<Product>>,
{
    let mut seen = HashSet::new();
    let mut products = Vec::new();
    let mut dropped = 0usize;

    for product in batches.into_iter().flatten() {
        if seen.insert(product.id.clone()) {
            products.push(product);
        } else {
            tracing::debug!(
                product_id = %product.id,
                source = %product.source,
                "duplicate product id; keeping first occurrence"
            );
            dropped += 1;
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, kept = products.len(), "deduplicated catalog");
    }
    products
}

/// Normalizes fetched batches and aggregates them, turning each failed
/// source into a [`SourceFailure`] and a one-time notification.
pub fn merge_fetch_results(
    results: Vec<(Source, Result<Vec<RawProduct>, SourceError>)>,
    categories: &CategoryCatalog,
    notifier: &mut Notifier,
) -> CatalogLoad {
    let mut failures = Vec::new();
    let mut batches = Vec::with_capacity(results.len());

    for (source, result) in results {
        match result {
            Ok(raw) => {
                tracing::info!(%source, count = raw.len(), "loaded product source");
                batches.push(
                    raw.into_iter()
                        .map(|p| normalize_product(p, categories))
                        .collect::<Vec<_>>(),
                );
            }
            Err(e) => {
                tracing::error!(%source, error = %e, "product source failed; continuing without it");
                notifier.notify_once(
                    NotificationLevel::Error,
                    format!("source-failed:{source}"),
                    format!("Could not load {source} products. Showing the rest of the catalog."),
                );
                failures.push(SourceFailure {
                    source,
                    message: e.to_string(),
                });
            }
        }
    }

    CatalogLoad {
        products: aggregate(batches),
        failures,
    }
}

/// Loads and merges every configured source.
pub struct CatalogLoader {
    categories: CategoryCatalog,
    local_catalog_path: Option<PathBuf>,
    woocommerce: Option<WooCommerceClient>,
    shopify: Option<ShopifyClient>,
    page_size: u32,
}

impl CatalogLoader {
    /// A loader with no sources configured.
    #[must_use]
    pub fn new(categories: CategoryCatalog) -> Self {
        Self {
            categories,
            local_catalog_path: None,
            woocommerce: None,
            shopify: None,
            page_size: 100,
        }
    }

    /// Builds a loader for every source enabled in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if an HTTP client cannot be constructed.
    pub fn from_config(
        config: &AppConfig,
        categories: CategoryCatalog,
    ) -> Result<Self, SourceError> {
        let options = ClientOptions {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
        };

        let mut loader = Self::new(categories).with_page_size(config.page_size);

        if let Some(path) = &config.local_catalog_path {
            loader = loader.with_local_catalog(path.clone());
        }

        if let Some(url) = &config.woocommerce_store_url {
            let credentials = config
                .woocommerce_consumer_key
                .clone()
                .zip(config.woocommerce_consumer_secret.clone())
                .map(|(consumer_key, consumer_secret)| WooCredentials {
                    consumer_key,
                    consumer_secret,
                });
            loader = loader.with_woocommerce(WooCommerceClient::new(url, credentials, &options)?);
        }

        if let Some(url) = &config.shopify_store_url {
            loader = loader.with_shopify(ShopifyClient::new(url, &options)?);
        }

        Ok(loader)
    }

    #[must_use]
    pub fn with_local_catalog(mut self, path: PathBuf) -> Self {
        self.local_catalog_path = Some(path);
        self
    }

    #[must_use]
    pub fn with_woocommerce(mut self, client: WooCommerceClient) -> Self {
        self.woocommerce = Some(client);
        self
    }

    #[must_use]
    pub fn with_shopify(mut self, client: ShopifyClient) -> Self {
        self.shopify = Some(client);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn categories(&self) -> &CategoryCatalog {
        &self.categories
    }

    /// Fetches all configured sources concurrently and merges them.
    ///
    /// Never fails as a whole; per-source errors end up in
    /// [`CatalogLoad::failures`] and in `notifier`.
    pub async fn load(&self, notifier: &mut Notifier) -> CatalogLoad {
        let local = async {
            let path = self.local_catalog_path.as_ref()?;
            Some(load_local_catalog(path).await.map(|products| {
                products
                    .into_iter()
                    .map(RawProduct::Local)
                    .collect::<Vec<_>>()
            }))
        };

        let woocommerce = async {
            let client = self.woocommerce.as_ref()?;
            Some(client.fetch_all_products(self.page_size).await.map(|products| {
                products
                    .into_iter()
                    .map(RawProduct::WooCommerce)
                    .collect::<Vec<_>>()
            }))
        };

        let shopify = async {
            let client = self.shopify.as_ref()?;
            Some(client.fetch_all_products(self.page_size).await.map(|products| {
                products
                    .into_iter()
                    .map(RawProduct::Shopify)
                    .collect::<Vec<_>>()
            }))
        };

        let (local, woocommerce, shopify) = futures::join!(local, woocommerce, shopify);

        let results: Vec<_> = [
            (Source::Local, local),
            (Source::WooCommerce, woocommerce),
            (Source::Shopify, shopify),
        ]
        .into_iter()
        .filter_map(|(source, result)| result.map(|r| (source, r)))
        .collect();

        if results.is_empty() {
            tracing::warn!("no product sources configured; catalog is empty");
        }

        merge_fetch_results(results, &self.categories, notifier)
    }
}
