use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Timing and gesture tuning for the product carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    /// Delay between starting a transition and moving the active index,
    /// which lets the exit animation begin.
    pub transition_delay: Duration,
    /// How long autoplay stays suspended after a manual navigation.
    pub autoplay_cooldown: Duration,
    /// Period between automatic advances while autoplay is enabled.
    pub autoplay_interval: Duration,
    /// Horizontal movement, in pixels, after which a pointer drag counts as a swipe.
    pub swipe_move_px: u32,
    /// Horizontal distance, in pixels, a released swipe must exceed to navigate.
    pub swipe_commit_px: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            transition_delay: Duration::from_millis(50),
            autoplay_cooldown: Duration::from_secs(10),
            autoplay_interval: Duration::from_secs(5),
            swipe_move_px: 10,
            swipe_commit_px: 80,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub local_catalog_path: Option<PathBuf>,
    pub categories_path: Option<PathBuf>,
    pub shopify_store_url: Option<String>,
    pub woocommerce_store_url: Option<String>,
    pub woocommerce_consumer_key: Option<String>,
    pub woocommerce_consumer_secret: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_size: u32,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub carousel: CarouselConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("local_catalog_path", &self.local_catalog_path)
            .field("categories_path", &self.categories_path)
            .field("shopify_store_url", &self.shopify_store_url)
            .field("woocommerce_store_url", &self.woocommerce_store_url)
            .field(
                "woocommerce_consumer_key",
                &self.woocommerce_consumer_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "woocommerce_consumer_secret",
                &self
                    .woocommerce_consumer_secret
                    .as_ref()
                    .map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_size", &self.page_size)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("carousel", &self.carousel)
            .finish()
    }
}
