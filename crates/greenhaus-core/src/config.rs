use std::path::PathBuf;
use std::time::Duration;

use crate::app_config::{AppConfig, CarouselConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values are treated as unset so `.env` templates can leave them empty.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("GREENHAUS_ENV", "development"))?;
    let log_level = or_default("GREENHAUS_LOG_LEVEL", "info");
    let local_catalog_path = optional("GREENHAUS_LOCAL_CATALOG_PATH").map(PathBuf::from);
    let categories_path = optional("GREENHAUS_CATEGORIES_PATH").map(PathBuf::from);

    let shopify_store_url = optional("SHOPIFY_STORE_URL");
    let woocommerce_store_url = optional("WOOCOMMERCE_STORE_URL");
    let woocommerce_consumer_key = optional("WOOCOMMERCE_CONSUMER_KEY");
    let woocommerce_consumer_secret = optional("WOOCOMMERCE_CONSUMER_SECRET");

    if woocommerce_consumer_key.is_some() != woocommerce_consumer_secret.is_some() {
        return Err(ConfigError::InvalidEnvVar {
            var: "WOOCOMMERCE_CONSUMER_KEY".to_string(),
            reason: "WOOCOMMERCE_CONSUMER_KEY and WOOCOMMERCE_CONSUMER_SECRET must be set together"
                .to_string(),
        });
    }

    let request_timeout_secs = parse_u64("GREENHAUS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GREENHAUS_USER_AGENT", "greenhaus/0.1 (storefront)");
    let page_size = parse_u32("GREENHAUS_PAGE_SIZE", "100")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GREENHAUS_PAGE_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let max_retries = parse_u32("GREENHAUS_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("GREENHAUS_RETRY_BACKOFF_BASE_SECS", "1")?;

    let carousel = CarouselConfig {
        transition_delay: Duration::from_millis(parse_u64(
            "GREENHAUS_CAROUSEL_TRANSITION_DELAY_MS",
            "50",
        )?),
        autoplay_cooldown: Duration::from_millis(parse_u64(
            "GREENHAUS_CAROUSEL_AUTOPLAY_COOLDOWN_MS",
            "10000",
        )?),
        autoplay_interval: Duration::from_millis(parse_u64(
            "GREENHAUS_CAROUSEL_AUTOPLAY_INTERVAL_MS",
            "5000",
        )?),
        swipe_move_px: CarouselConfig::default().swipe_move_px,
        swipe_commit_px: parse_u32("GREENHAUS_CAROUSEL_SWIPE_COMMIT_PX", "80")?,
    };

    if carousel.autoplay_interval.is_zero() {
        return Err(ConfigError::InvalidEnvVar {
            var: "GREENHAUS_CAROUSEL_AUTOPLAY_INTERVAL_MS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        local_catalog_path,
        categories_path,
        shopify_store_url,
        woocommerce_store_url,
        woocommerce_consumer_key,
        woocommerce_consumer_secret,
        request_timeout_secs,
        user_agent,
        page_size,
        max_retries,
        retry_backoff_base_secs,
        carousel,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GREENHAUS_ENV".to_string(),
            reason: format!("unknown environment '{other}'; expected development, test or production"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
