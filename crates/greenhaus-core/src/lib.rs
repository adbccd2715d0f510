pub mod app_config;
pub mod categories;
pub mod config;
pub mod filters;
pub mod products;

pub use app_config::{AppConfig, CarouselConfig, Environment};
pub use categories::{
    load_categories, CategoryCatalog, CategoryDefinition, CategoryFilter, ALL_CATEGORIES,
    UNCATEGORIZED,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::{max_price, FilterOptions, Range, SortBy, THC_MAX, THC_MIN};
pub use products::{Product, Source, PLACEHOLDER_IMAGE};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("invalid category configuration: {0}")]
    Validation(String),
}
