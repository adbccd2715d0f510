//! Product list filtering and sorting for the storefront view.

use std::cmp::Ordering;

use greenhaus_core::{CategoryFilter, FilterOptions, Product, SortBy};

use crate::thc::parse_thc;

/// Applies search, category, price and THC predicates, then sorts.
///
/// The input slice is never reordered; the result borrows from it.
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    options: &FilterOptions,
    category: &CategoryFilter,
    query: &str,
) -> Vec<&'a Product> {
    let needle = normalize_query(query);

    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| matches(p, options, category, &needle))
        .collect();

    sort_products(&mut matched, options.sort_by);
    matched
}

/// Stable sort; [`SortBy::Popularity`] keeps the given order.
pub fn sort_products(products: &mut [&Product], sort_by: SortBy) {
    if sort_by != SortBy::Popularity {
        products.sort_by(|a, b| order(a, b, sort_by));
    }
}

fn order(a: &Product, b: &Product, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Popularity => Ordering::Equal,
        SortBy::PriceAsc => a.price.total_cmp(&b.price),
        SortBy::PriceDesc => b.price.total_cmp(&a.price),
        SortBy::ThcDesc => parse_thc(b.thc.as_deref()).total_cmp(&parse_thc(a.thc.as_deref())),
    }
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Accessories skip the THC predicate; potency does not apply to them.
fn matches(product: &Product, options: &FilterOptions, category: &CategoryFilter, needle: &str) -> bool {
    matches_search(product, needle)
        && category.matches(&product.category)
        && options.price_range.contains(product.price)
        && (product.is_accessory() || options.thc_range.contains(parse_thc(product.thc.as_deref())))
}

/// `needle` is trimmed and lowercased; empty matches everything.
fn matches_search(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let contains = |field: &str| field.to_lowercase().contains(needle);

    contains(&product.name)
        || product.strain.as_deref().is_some_and(contains)
        || product.description.as_deref().is_some_and(contains)
}

/// Memoized filter state for one storefront view.
///
/// Holds the pipeline inputs and the last result. Setters recompute only
/// when their input actually changes. [`ProductFilter::generation`] bumps
/// whenever the filtered list changes, in membership, order or the content
/// of any listed product, which is the signal for the carousel to reset.
#[derive(Debug, Clone)]
pub struct ProductFilter {
    products: Vec<Product>,
    options: FilterOptions,
    category: CategoryFilter,
    query: String,
    filtered: Vec<usize>,
    /// Copy of the last published result, compared on refresh.
    published: Vec<Product>,
    generation: u64,
}

impl ProductFilter {
    /// Starts with default options sized to `products`, all categories and
    /// an empty search.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let options = FilterOptions::for_catalog(&products);
        let mut filter = Self {
            products,
            options,
            category: CategoryFilter::All,
            query: String::new(),
            filtered: Vec::new(),
            published: Vec::new(),
            generation: 0,
        };
        filter.refresh();
        filter.generation = 0;
        filter
    }

    pub fn set_products(&mut self, products: Vec<Product>) {
        if products == self.products {
            return;
        }
        self.products = products;
        self.refresh();
    }

    pub fn set_options(&mut self, options: FilterOptions) {
        if options == self.options {
            return;
        }
        self.options = options;
        self.refresh();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        if category == self.category {
            return;
        }
        self.category = category;
        self.refresh();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.refresh();
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    #[must_use]
    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn filtered_products(&self) -> Vec<&Product> {
        self.filtered.iter().map(|&i| &self.products[i]).collect()
    }

    /// Primary image of every filtered product, in display order.
    #[must_use]
    pub fn carousel_images(&self) -> Vec<String> {
        self.filtered
            .iter()
            .map(|&i| self.products[i].primary_image().to_owned())
            .collect()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn refresh(&mut self) {
        let needle = normalize_query(&self.query);
        let products = &self.products;

        let mut indices: Vec<usize> = (0..products.len())
            .filter(|&i| matches(&products[i], &self.options, &self.category, &needle))
            .collect();
        if self.options.sort_by != SortBy::Popularity {
            indices.sort_by(|&a, &b| order(&products[a], &products[b], self.options.sort_by));
        }

        let unchanged = indices.len() == self.published.len()
            && indices
                .iter()
                .zip(&self.published)
                .all(|(&i, last)| products[i] == *last);
        self.filtered = indices;

        if !unchanged {
            self.published = self.filtered.iter().map(|&i| self.products[i].clone()).collect();
            self.generation += 1;
            tracing::debug!(
                generation = self.generation,
                count = self.filtered.len(),
                "filtered product list changed"
            );
        }
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
