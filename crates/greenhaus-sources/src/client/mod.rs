//! HTTP clients for the remote commerce platforms.
//!
//! Both clients share the same response classification and retry policy:
//! 429 becomes [`SourceError::RateLimited`], 404 [`SourceError::NotFound`],
//! any other non-2xx [`SourceError::UnexpectedStatus`]. Transient failures are
//! retried by [`crate::rate_limit::retry_with_backoff`].

mod origin;
mod shopify;
mod woocommerce;

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::error::SourceError;

pub use origin::extract_store_origin;
pub use shopify::ShopifyClient;
pub use woocommerce::{WooCommerceClient, WooCredentials};

/// Maximum number of pages fetched per store before giving up.
/// Guards against cycling cursors and misreported page counts.
pub const MAX_PAGES: u32 = 200;

/// Retry and transport settings shared by both clients.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure for retriable errors.
    pub max_retries: u32,
    /// Base delay for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub backoff_base_secs: u64,
}

fn build_http_client(options: &ClientOptions) -> Result<Client, SourceError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(options.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(&options.user_agent)
        .build()?)
}

/// Maps non-success statuses onto typed errors, passing 2xx responses through.
fn classify_response(
    response: Response,
    store_url: &str,
    url: &str,
) -> Result<Response, SourceError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);

        return Err(SourceError::RateLimited {
            domain: origin::extract_domain(store_url),
            retry_after_secs,
        });
    }

    if status == StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound {
            url: url.to_owned(),
        });
    }

    if !status.is_success() {
        return Err(SourceError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response)
}

/// Reads a response body and deserializes it, tagging failures with `context`.
async fn read_json<T>(response: Response, context: impl FnOnce() -> String) -> Result<T, SourceError>
where
    T: serde::de::DeserializeOwned,
{
    let body = response.text().await?;
    serde_json::from_str::<T>(&body).map_err(|e| SourceError::Deserialize {
        context: context(),
        source: e,
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
