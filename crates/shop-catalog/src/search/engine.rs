//! Pure query evaluation: filter, sort, paginate.

use crate::catalog::Product;
use crate::search::criteria::{QueryCriteria, SortKey};
use crate::search::results::{Pagination, QueryResults};

/// Fixed number of items per page.
pub const PAGE_SIZE: usize = 20;

/// Evaluate criteria against a catalog snapshot.
///
/// Deterministic and stateless: the same snapshot and criteria always
/// produce the same page. Stages run in a fixed order:
///
/// 1. filter — logical AND of the active predicates;
/// 2. sort — stable sort on rating, so equal ratings keep the snapshot's
///    insertion order in either direction;
/// 3. paginate — [`PAGE_SIZE`] items per page. The requested page is not
///    clamped: pages past the end come back empty while
///    `pagination.total` still reports the filtered count.
pub fn run(snapshot: &[Product], criteria: &QueryCriteria) -> QueryResults {
    let mut filtered: Vec<Product> = snapshot
        .iter()
        .filter(|product| criteria.matches(product))
        .cloned()
        .collect();

    match criteria.sort {
        SortKey::RatingDesc => filtered.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::RatingAsc => filtered.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
    }

    let pagination = Pagination::new(criteria.page, PAGE_SIZE, filtered.len());
    let items: Vec<Product> = if pagination.is_out_of_range() {
        Vec::new()
    } else {
        filtered
            .into_iter()
            .skip(pagination.offset())
            .take(PAGE_SIZE)
            .collect()
    };

    QueryResults::new(items, pagination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductStatus;
    use crate::ids::ProductId;
    use crate::search::criteria::FILTER_ALL;

    fn product(n: usize, rating: f64, price: f64, category: &str) -> Product {
        Product {
            id: ProductId::new(format!("prod-{n}")),
            sku: format!("SKU-{n}"),
            name: format!("Item {n}"),
            price,
            quantity: 1,
            category: category.to_string(),
            brand: "Acme".to_string(),
            color: "Black".to_string(),
            status: ProductStatus::Available,
            rating,
            image: None,
            in_stock: true,
            created_at: 0,
        }
    }

    /// 25 products with distinct ratings 0.1, 0.2, ... 2.5.
    fn distinct_ratings_snapshot() -> Vec<Product> {
        (0..25)
            .map(|n| product(n, (n as f64 + 1.0) / 10.0, 10.0 + n as f64, "Electronics"))
            .collect()
    }

    #[test]
    fn test_no_filters_returns_everything_paged() {
        let snapshot = distinct_ratings_snapshot();

        let page1 = run(&snapshot, &QueryCriteria::new());
        assert_eq!(page1.len(), 20);
        assert_eq!(page1.filtered_count(), 25);
        assert_eq!(page1.pagination.total_pages, 2);
        // Descending by rating: the highest-rated item leads.
        assert_eq!(page1.items[0].name, "Item 24");

        let page2 = run(&snapshot, &QueryCriteria::new().with_page(2));
        assert_eq!(page2.len(), 5);
        assert!(!page2.pagination.has_next);

        let page3 = run(&snapshot, &QueryCriteria::new().with_page(3));
        assert!(page3.is_empty());
        assert_eq!(page3.pagination.total_pages, 2);
        // Empty page, but the filtered count still says items exist.
        assert_eq!(page3.filtered_count(), 25);
    }

    #[test]
    fn test_pages_reconstruct_the_sorted_sequence() {
        let snapshot = distinct_ratings_snapshot();

        let mut collected = Vec::new();
        let total_pages = run(&snapshot, &QueryCriteria::new()).pagination.total_pages;
        for page in 1..=total_pages {
            collected.extend(run(&snapshot, &QueryCriteria::new().with_page(page)).items);
        }

        assert_eq!(collected.len(), 25);
        let ratings: Vec<f64> = collected.iter().map(|p| p.rating).collect();
        let mut expected = ratings.clone();
        expected.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(ratings, expected);

        // No duplicates across pages.
        let mut names: Vec<String> = collected.into_iter().map(|p| p.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 25);
    }

    #[test]
    fn test_and_composition_of_filters() {
        let mut snapshot = distinct_ratings_snapshot();
        snapshot.push(product(100, 3.0, 30.0, "Books"));
        snapshot.push(product(101, 3.1, 500.0, "Electronics"));

        let criteria = QueryCriteria::new()
            .with_category("Electronics")
            .with_min_price("10")
            .with_max_price("50");
        let results = run(&snapshot, &criteria);

        assert!(results.filtered_count() <= snapshot.len());
        for item in &results.items {
            assert_eq!(item.category, "Electronics");
            assert!(item.price >= 10.0 && item.price <= 50.0);
        }
        // The Books item and the 500.0 Electronics item fell out.
        assert_eq!(results.filtered_count(), 25);
    }

    #[test]
    fn test_inactive_predicates_exclude_nothing() {
        let snapshot = distinct_ratings_snapshot();
        let criteria = QueryCriteria::new()
            .with_search("")
            .with_category(FILTER_ALL)
            .with_brand(FILTER_ALL)
            .with_status(FILTER_ALL)
            .with_min_price("")
            .with_max_price("");

        assert_eq!(run(&snapshot, &criteria).filtered_count(), 25);
    }

    #[test]
    fn test_sort_is_stable_on_equal_ratings() {
        // Same rating everywhere: output order must equal insertion order,
        // in both directions.
        let snapshot: Vec<Product> = (0..6).map(|n| product(n, 4.0, 10.0, "X")).collect();
        let insertion: Vec<String> = snapshot.iter().map(|p| p.name.clone()).collect();

        let desc = run(&snapshot, &QueryCriteria::new().with_sort(SortKey::RatingDesc));
        let desc_names: Vec<String> = desc.items.into_iter().map(|p| p.name).collect();
        assert_eq!(desc_names, insertion);

        let asc = run(&snapshot, &QueryCriteria::new().with_sort(SortKey::RatingAsc));
        let asc_names: Vec<String> = asc.items.into_iter().map(|p| p.name).collect();
        assert_eq!(asc_names, insertion);
    }

    #[test]
    fn test_ties_keep_insertion_order_between_groups() {
        let mut snapshot = Vec::new();
        snapshot.push(product(0, 5.0, 10.0, "X"));
        snapshot.push(product(1, 3.0, 10.0, "X"));
        snapshot.push(product(2, 5.0, 10.0, "X"));
        snapshot.push(product(3, 3.0, 10.0, "X"));

        let results = run(&snapshot, &QueryCriteria::new());
        let names: Vec<String> = results.items.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Item 0", "Item 2", "Item 1", "Item 3"]);
    }

    #[test]
    fn test_page_zero_is_out_of_range() {
        let snapshot = distinct_ratings_snapshot();
        let results = run(&snapshot, &QueryCriteria::new().with_page(0));

        assert!(results.is_empty());
        assert_eq!(results.filtered_count(), 25);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let snapshot = distinct_ratings_snapshot();
        let criteria = QueryCriteria::new()
            .with_search("item")
            .with_max_price("20");

        let first = run(&snapshot, &criteria);
        let second = run(&snapshot, &criteria);
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_filters_by_name_substring() {
        let mut snapshot = distinct_ratings_snapshot();
        snapshot.push(product(200, 1.0, 5.0, "Electronics"));
        // "Item 2" matches Item 2, Item 20..24, and Item 200.
        let results = run(&snapshot, &QueryCriteria::new().with_search("item 2"));
        assert_eq!(results.filtered_count(), 7);
    }
}
