pub mod aggregate;
pub mod client;
pub mod error;
pub mod images;
pub mod local;
pub mod normalize;
pub mod notify;
pub mod pagination;
mod parse;
mod rate_limit;
pub mod types;

pub use aggregate::{aggregate, merge_fetch_results, CatalogLoad, CatalogLoader, SourceFailure};
pub use client::{ClientOptions, ShopifyClient, WooCommerceClient, WooCredentials};
pub use error::SourceError;
pub use images::{normalize_images, product_image_path, resolve_image_path};
pub use local::{load_local_catalog, LocalProduct};
pub use normalize::normalize_product;
pub use notify::{Notification, NotificationLevel, Notifier};
pub use types::{RawProduct, ShopifyProduct, ShopifyVariant, WooProduct};
