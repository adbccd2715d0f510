//! `products` command: aggregate, filter, sort and print the catalog.
//!
//! A failing source never aborts the run; its notification is printed to
//! stderr and the remaining sources are shown.

use greenhaus_core::{AppConfig, CategoryFilter, FilterOptions, Product, Range, SortBy};
use greenhaus_sources::{CatalogLoader, Notifier};
use greenhaus_storefront::{parse_thc, ProductFilter};

use crate::categories::load_category_catalog;

#[derive(Debug, clap::Args)]
pub(crate) struct ProductsArgs {
    /// Case-insensitive match on name, strain or description
    #[arg(long)]
    pub(crate) search: Option<String>,

    /// Category name, or "All"
    #[arg(long, default_value = "All")]
    pub(crate) category: String,

    #[arg(long)]
    pub(crate) thc_min: Option<f64>,

    #[arg(long)]
    pub(crate) thc_max: Option<f64>,

    #[arg(long)]
    pub(crate) price_min: Option<f64>,

    #[arg(long)]
    pub(crate) price_max: Option<f64>,

    /// popularity, price-asc, price-desc or thc-desc
    #[arg(long, default_value_t = SortBy::Popularity)]
    pub(crate) sort: SortBy,

    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

/// Catalog-sized defaults with any explicit bounds from `args` applied.
pub(crate) fn build_filter_options(products: &[Product], args: &ProductsArgs) -> FilterOptions {
    let defaults = FilterOptions::for_catalog(products);
    FilterOptions {
        thc_range: Range::new(
            args.thc_min.unwrap_or(defaults.thc_range.min),
            args.thc_max.unwrap_or(defaults.thc_range.max),
        ),
        price_range: Range::new(
            args.price_min.unwrap_or(defaults.price_range.min),
            args.price_max.unwrap_or(defaults.price_range.max),
        ),
        sort_by: args.sort,
    }
}

pub(crate) async fn run_products(config: &AppConfig, args: &ProductsArgs) -> anyhow::Result<()> {
    let categories = load_category_catalog(config)?;
    let loader = CatalogLoader::from_config(config, categories)?;

    let mut notifier = Notifier::new();
    let load = loader.load(&mut notifier).await;
    for notification in notifier.drain() {
        eprintln!("{}: {}", notification.level, notification.message);
    }

    let options = build_filter_options(&load.products, args);
    let mut view = ProductFilter::new(load.products);
    view.set_options(options);
    view.set_category(CategoryFilter::from_label(&args.category));
    view.set_query(args.search.clone().unwrap_or_default());

    let filtered = view.filtered_products();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&filtered)?);
        return Ok(());
    }

    println!(
        "{:<12} {:<36} {:>9}  {:<14} {:>6}  SOURCE",
        "ID", "NAME", "PRICE", "CATEGORY", "THC"
    );
    for product in &filtered {
        println!(
            "{:<12} {:<36} {:>9.2}  {:<14} {:>6}  {}",
            truncate(&product.id, 12),
            truncate(&product.name, 36),
            product.price,
            truncate(&product.category, 14),
            thc_column(product),
            product.source,
        );
    }
    println!(
        "\n{} of {} products",
        filtered.len(),
        view.products().len()
    );

    Ok(())
}

fn thc_column(product: &Product) -> String {
    if product.is_accessory() || product.thc.is_none() {
        "-".to_string()
    } else {
        format!("{:.1}", parse_thc(product.thc.as_deref()))
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let cut: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
