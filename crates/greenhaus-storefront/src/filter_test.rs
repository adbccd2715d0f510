use greenhaus_core::{Range, Source};

use super::*;

fn product(id: &str, price: f64, category: &str, thc: Option<&str>) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        price,
        category: category.to_string(),
        images: vec![format!("/images/{id}.jpg")],
        thc: thc.map(str::to_string),
        cbd: None,
        description: None,
        effects: vec![],
        benefits: vec![],
        usage: None,
        strain: None,
        origin: None,
        source: Source::Local,
    }
}

fn options(thc: (f64, f64), price: (f64, f64), sort_by: SortBy) -> FilterOptions {
    FilterOptions {
        thc_range: Range::new(thc.0, thc.1),
        price_range: Range::new(price.0, price.1),
        sort_by,
    }
}

fn ids(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.id.clone()).collect()
}

#[test]
fn thc_range_excludes_stronger_product() {
    let products = vec![
        product("1", 10.0, "Oils", Some("5%")),
        product("2", 20.0, "Oils", Some("15%")),
    ];
    let opts = options((0.0, 10.0), (0.0, 100.0), SortBy::Popularity);

    let result = filter_products(&products, &opts, &CategoryFilter::All, "");
    assert_eq!(ids(&result), vec!["1"]);
}

#[test]
fn accessories_are_never_excluded_on_thc() {
    let products = vec![
        product("pipe", 25.0, "Accessories", None),
        product("grinder", 15.0, "Accessories", Some("40%")),
        product("oil", 30.0, "Oils", Some("1%")),
    ];
    let opts = options((5.0, 10.0), (0.0, 100.0), SortBy::Popularity);
    let category = CategoryFilter::from_label("Accessories");

    let result = filter_products(&products, &opts, &category, "");
    assert_eq!(ids(&result), vec!["pipe", "grinder"]);

    let all = filter_products(&products, &opts, &CategoryFilter::All, "");
    assert_eq!(ids(&all), vec!["pipe", "grinder"]);
}

#[test]
fn price_range_is_inclusive() {
    let products = vec![
        product("a", 10.0, "Oils", None),
        product("b", 20.0, "Oils", None),
        product("c", 20.01, "Oils", None),
    ];
    let opts = options((0.0, 30.0), (10.0, 20.0), SortBy::Popularity);

    let result = filter_products(&products, &opts, &CategoryFilter::All, "");
    assert_eq!(ids(&result), vec!["a", "b"]);
}

#[test]
fn category_filter_is_exact() {
    let products = vec![
        product("a", 10.0, "Oils", None),
        product("b", 10.0, "oils", None),
        product("c", 10.0, "Flower", None),
    ];
    let opts = options((0.0, 30.0), (0.0, 100.0), SortBy::Popularity);

    let result = filter_products(&products, &opts, &CategoryFilter::from_label("Oils"), "");
    assert_eq!(ids(&result), vec!["a"]);

    let all = filter_products(&products, &opts, &CategoryFilter::from_label("all"), "");
    assert_eq!(all.len(), 3);
}

#[test]
fn search_matches_name_strain_or_description() {
    let mut by_name = product("name", 10.0, "Flower", None);
    by_name.name = "Blue Dream".to_string();
    let mut by_strain = product("strain", 10.0, "Flower", None);
    by_strain.strain = Some("Blueberry Kush".to_string());
    let mut by_description = product("desc", 10.0, "Flower", None);
    by_description.description = Some("Notes of BLUE cheese".to_string());
    let miss = product("miss", 10.0, "Flower", None);

    let products = vec![by_name, by_strain, by_description, miss];
    let opts = options((0.0, 30.0), (0.0, 100.0), SortBy::Popularity);

    let result = filter_products(&products, &opts, &CategoryFilter::All, "  blue ");
    assert_eq!(ids(&result), vec!["name", "strain", "desc"]);

    let everything = filter_products(&products, &opts, &CategoryFilter::All, "   ");
    assert_eq!(everything.len(), 4);
}

#[test]
fn price_sorts_are_reverses_without_ties() {
    let products = vec![
        product("a", 30.0, "Oils", None),
        product("b", 10.0, "Oils", None),
        product("c", 25.0, "Oils", None),
        product("d", 12.5, "Oils", None),
    ];
    let asc = filter_products(
        &products,
        &options((0.0, 30.0), (0.0, 100.0), SortBy::PriceAsc),
        &CategoryFilter::All,
        "",
    );
    let desc = filter_products(
        &products,
        &options((0.0, 30.0), (0.0, 100.0), SortBy::PriceDesc),
        &CategoryFilter::All,
        "",
    );

    assert_eq!(ids(&asc), vec!["b", "d", "c", "a"]);
    let mut reversed = ids(&desc);
    reversed.reverse();
    assert_eq!(ids(&asc), reversed);
}

#[test]
fn thc_desc_uses_parsed_values_and_is_stable() {
    let products = vec![
        product("low", 10.0, "Flower", Some("< 0.3%")),
        product("range", 10.0, "Flower", Some("10-15%")),
        product("high", 10.0, "Flower", Some("22%")),
        product("tie", 10.0, "Flower", Some("12.5%")),
    ];
    let opts = options((0.0, 30.0), (0.0, 100.0), SortBy::ThcDesc);

    let result = filter_products(&products, &opts, &CategoryFilter::All, "");
    assert_eq!(ids(&result), vec!["high", "range", "tie", "low"]);
}

#[test]
fn popularity_keeps_input_order_and_input_is_untouched() {
    let products = vec![
        product("z", 30.0, "Oils", None),
        product("a", 10.0, "Oils", None),
    ];
    let before = products.clone();
    let opts = options((0.0, 30.0), (0.0, 100.0), SortBy::Popularity);

    let result = filter_products(&products, &opts, &CategoryFilter::All, "");
    assert_eq!(ids(&result), vec!["z", "a"]);

    let _ = filter_products(
        &products,
        &options((0.0, 30.0), (0.0, 100.0), SortBy::PriceAsc),
        &CategoryFilter::All,
        "",
    );
    assert_eq!(products, before);
}

#[test]
fn product_filter_defaults_show_whole_catalog() {
    let filter = ProductFilter::new(vec![
        product("1", 10.0, "Oils", Some("5%")),
        product("2", 20.4, "Oils", Some("15%")),
    ]);

    assert_eq!(filter.generation(), 0);
    assert!((filter.options().price_range.max - 21.0).abs() < f64::EPSILON);
    assert_eq!(ids(&filter.filtered_products()), vec!["1", "2"]);
    assert_eq!(filter.carousel_images(), vec!["/images/1.jpg", "/images/2.jpg"]);
}

#[test]
fn product_filter_bumps_generation_only_when_result_changes() {
    let mut filter = ProductFilter::new(vec![
        product("1", 10.0, "Oils", Some("5%")),
        product("2", 20.0, "Flower", Some("15%")),
    ]);

    filter.set_query("");
    filter.set_category(CategoryFilter::All);
    assert_eq!(filter.generation(), 0);

    filter.set_category(CategoryFilter::from_label("Flower"));
    assert_eq!(filter.generation(), 1);
    assert_eq!(ids(&filter.filtered_products()), vec!["2"]);

    // A search that still matches the same products leaves the list alone.
    filter.set_query("product");
    assert_eq!(filter.generation(), 1);

    filter.set_query("nothing matches");
    assert_eq!(filter.generation(), 2);
    assert!(filter.filtered_products().is_empty());
}

#[test]
fn product_filter_bumps_generation_when_listed_images_change() {
    let mut filter = ProductFilter::new(vec![
        product("1", 10.0, "Oils", Some("5%")),
        product("2", 20.0, "Oils", Some("15%")),
    ]);

    let mut updated = filter.products().to_vec();
    updated[0].images = vec!["/images/new.jpg".to_owned()];
    filter.set_products(updated);

    assert_eq!(filter.generation(), 1);
    assert_eq!(filter.carousel_images(), vec!["/images/new.jpg", "/images/2.jpg"]);
}

#[test]
fn product_filter_ignores_changes_to_hidden_products() {
    let mut filter = ProductFilter::new(vec![
        product("1", 10.0, "Oils", Some("5%")),
        product("2", 20.0, "Flower", Some("15%")),
    ]);
    filter.set_category(CategoryFilter::from_label("Oils"));
    assert_eq!(filter.generation(), 1);

    let mut updated = filter.products().to_vec();
    updated[1].name = "Renamed Flower".to_owned();
    filter.set_products(updated);

    assert_eq!(filter.generation(), 1);
}

#[test]
fn product_filter_tracks_new_products_and_options() {
    let mut filter = ProductFilter::new(vec![product("1", 10.0, "Oils", Some("5%"))]);

    filter.set_products(vec![
        product("1", 10.0, "Oils", Some("5%")),
        product("3", 8.0, "Oils", Some("25%")),
    ]);
    assert_eq!(filter.generation(), 1);
    assert_eq!(filter.products().len(), 2);

    let mut opts = *filter.options();
    opts.thc_range = Range::new(0.0, 10.0);
    filter.set_options(opts);
    assert_eq!(filter.generation(), 2);
    assert_eq!(ids(&filter.filtered_products()), vec!["1"]);

    opts.sort_by = SortBy::PriceDesc;
    filter.set_options(opts);
    assert_eq!(filter.generation(), 2, "single result is unchanged by sort");
}
