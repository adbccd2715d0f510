use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Selector value that matches every category.
pub const ALL_CATEGORIES: &str = "All";

/// Label assigned to products whose category is empty.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub name: String,
    /// Alternate spellings mapped onto `name`, e.g. `"prerolls"` → `"Pre-Rolls"`.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Substrings that identify the category in free-form source labels.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// The storefront's known categories and the rules used to map raw source
/// labels onto them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    pub categories: Vec<CategoryDefinition>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        let def = |name: &str, aliases: &[&str], keywords: &[&str]| CategoryDefinition {
            name: name.to_string(),
            aliases: aliases.iter().map(|s| (*s).to_string()).collect(),
            keywords: keywords.iter().map(|s| (*s).to_string()).collect(),
        };
        Self {
            categories: vec![
                def("Flower", &["buds", "bud"], &["flower", "strain", "indica", "sativa"]),
                def("Pre-Rolls", &["prerolls", "pre rolls", "joints"], &["pre-roll", "preroll", "joint"]),
                def("Edibles", &["edible"], &["gumm", "chocolate", "edible", "candy", "beverage"]),
                def("Oils", &["tinctures", "tincture", "oil"], &["oil", "tincture", "drops"]),
                def("Vapes", &["vaporizers", "cartridges", "carts"], &["vape", "cart", "pen"]),
                def("Concentrates", &["extracts"], &["wax", "shatter", "rosin", "resin", "concentrate"]),
                def("Topicals", &["topical", "creams"], &["balm", "lotion", "cream", "salve"]),
                def("Accessories", &["gear", "merch"], &["grinder", "pipe", "paper", "accessor", "battery"]),
            ],
        }
    }
}

impl CategoryCatalog {
    /// Category names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Maps a raw source label onto a known category.
    ///
    /// Tries, in order: exact name, case-insensitive name, alias, keyword
    /// containment. Labels that match nothing pass through trimmed; empty
    /// labels become [`UNCATEGORIZED`].
    #[must_use]
    pub fn reconcile(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return UNCATEGORIZED.to_string();
        }

        if let Some(c) = self.categories.iter().find(|c| c.name == trimmed) {
            return c.name.clone();
        }

        let lower = trimmed.to_lowercase();
        if let Some(c) = self
            .categories
            .iter()
            .find(|c| c.name.to_lowercase() == lower)
        {
            return c.name.clone();
        }

        if let Some(c) = self
            .categories
            .iter()
            .find(|c| c.aliases.iter().any(|a| a.to_lowercase() == lower))
        {
            return c.name.clone();
        }

        if let Some(c) = self.categories.iter().find(|c| {
            c.keywords
                .iter()
                .any(|k| !k.is_empty() && lower.contains(&k.to_lowercase()))
        }) {
            return c.name.clone();
        }

        trimmed.to_string()
    }
}

/// Load and validate the category catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoryCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: CategoryCatalog = serde_yaml::from_str(&content)?;

    validate_categories(&catalog)?;

    Ok(catalog)
}

fn validate_categories(catalog: &CategoryCatalog) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_aliases = HashSet::new();

    for category in &catalog.categories {
        if category.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }

        if category.name.eq_ignore_ascii_case(ALL_CATEGORIES)
            || category.name.eq_ignore_ascii_case(UNCATEGORIZED)
        {
            return Err(ConfigError::Validation(format!(
                "category name '{}' is reserved",
                category.name
            )));
        }

        if !seen_names.insert(category.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category name: '{}'",
                category.name
            )));
        }

        for alias in &category.aliases {
            if !seen_aliases.insert(alias.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "alias '{alias}' is mapped to more than one category"
                )));
            }
        }
    }

    Ok(())
}

/// Category selector used by the filter pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Builds a selector from a UI value; `"All"` (any case) and blank
    /// values select everything.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::All
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "{ALL_CATEGORIES}"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
