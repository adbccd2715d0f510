//! `categories` command: shows the catalog used for category reconciliation.

use greenhaus_core::{AppConfig, CategoryCatalog};

/// Loads the category catalog from `GREENHAUS_CATEGORIES_PATH`, falling back
/// to the built-in set.
pub(crate) fn load_category_catalog(config: &AppConfig) -> anyhow::Result<CategoryCatalog> {
    match &config.categories_path {
        Some(path) => {
            let catalog = greenhaus_core::load_categories(path)?;
            tracing::debug!(path = %path.display(), count = catalog.categories.len(), "loaded category catalog");
            Ok(catalog)
        }
        None => Ok(CategoryCatalog::default()),
    }
}

pub(crate) fn run_categories(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = load_category_catalog(config)?;

    for category in &catalog.categories {
        println!("{}", category.name);
        if !category.aliases.is_empty() {
            println!("  aliases:  {}", category.aliases.join(", "));
        }
        if !category.keywords.is_empty() {
            println!("  keywords: {}", category.keywords.join(", "));
        }
    }

    Ok(())
}
