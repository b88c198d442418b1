//! Query criteria: the caller-owned filter/sort/page parameters.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Sentinel meaning "do not constrain" for the category, brand and status
/// filters.
pub const FILTER_ALL: &str = "all";

/// Sort options for catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    /// Highest rated first.
    #[default]
    RatingDesc,
    /// Lowest rated first.
    RatingAsc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::RatingDesc => "rating-high",
            SortKey::RatingAsc => "rating-low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "rating-high" => Some(SortKey::RatingDesc),
            "rating-low" => Some(SortKey::RatingAsc),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::RatingDesc => "Rating: High to Low",
            SortKey::RatingAsc => "Rating: Low to High",
        }
    }
}

/// Filter, sort and page parameters for one query.
///
/// Criteria are ephemeral values: built per render, handed to the engine,
/// discarded. A predicate contributes nothing when its criterion is the
/// [`FILTER_ALL`] sentinel (category/brand/status) or an empty string
/// (search and the price bounds). Price bounds that do not parse as numbers
/// deactivate only that bound; the query itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCriteria {
    /// Case-insensitive substring match against product names.
    pub search: String,
    /// Exact category, or [`FILTER_ALL`].
    pub category: String,
    /// Exact brand, or [`FILTER_ALL`].
    pub brand: String,
    /// Exact status display string, or [`FILTER_ALL`].
    pub status: String,
    /// Inclusive lower price bound; empty deactivates it.
    pub min_price: String,
    /// Inclusive upper price bound; empty deactivates it.
    pub max_price: String,
    /// Sort direction.
    pub sort: SortKey,
    /// Requested page, 1-indexed. The engine does not clamp this.
    pub page: u32,
}

impl Default for QueryCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: FILTER_ALL.to_string(),
            brand: FILTER_ALL.to_string(),
            status: FILTER_ALL.to_string(),
            min_price: String::new(),
            max_price: String::new(),
            sort: SortKey::default(),
            page: 1,
        }
    }
}

impl QueryCriteria {
    /// Criteria with every predicate inactive, sorted by rating descending,
    /// on page 1.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_min_price(mut self, min_price: impl Into<String>) -> Self {
        self.min_price = min_price.into();
        self
    }

    pub fn with_max_price(mut self, max_price: impl Into<String>) -> Self {
        self.max_price = max_price.into();
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Lower price bound, when active and parseable.
    pub fn min_price(&self) -> Option<f64> {
        parse_price(&self.min_price)
    }

    /// Upper price bound, when active and parseable.
    pub fn max_price(&self) -> Option<f64> {
        parse_price(&self.max_price)
    }

    /// Whether a product passes every active predicate.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.search.is_empty()
            && !product
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }

        if self.category != FILTER_ALL && product.category != self.category {
            return false;
        }

        if self.brand != FILTER_ALL && product.brand != self.brand {
            return false;
        }

        if self.status != FILTER_ALL && product.status.as_str() != self.status {
            return false;
        }

        if let Some(min) = self.min_price() {
            if product.price < min {
                return false;
            }
        }

        if let Some(max) = self.max_price() {
            if product.price > max {
                return false;
            }
        }

        true
    }
}

/// Parse a price criterion; empty or malformed input deactivates the bound.
fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|p| p.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductStatus;
    use crate::ids::ProductId;

    fn product(name: &str, category: &str, price: f64) -> Product {
        Product {
            id: ProductId::new("prod-test"),
            sku: "SKU-1".to_string(),
            name: name.to_string(),
            price,
            quantity: 1,
            category: category.to_string(),
            brand: "Acme".to_string(),
            color: "Black".to_string(),
            status: ProductStatus::Available,
            rating: 4.0,
            image: None,
            in_stock: true,
            created_at: 0,
        }
    }

    #[test]
    fn test_default_criteria_match_everything() {
        let criteria = QueryCriteria::new();
        assert!(criteria.matches(&product("Anything", "Toys", 1.0)));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let criteria = QueryCriteria::new().with_search("MOU");
        assert!(criteria.matches(&product("Wireless Mouse", "Electronics", 20.0)));
        assert!(!criteria.matches(&product("Keyboard", "Electronics", 20.0)));
    }

    #[test]
    fn test_category_equality() {
        let criteria = QueryCriteria::new().with_category("Electronics");
        assert!(criteria.matches(&product("Mouse", "Electronics", 20.0)));
        assert!(!criteria.matches(&product("Novel", "Books", 20.0)));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let criteria = QueryCriteria::new()
            .with_min_price("10")
            .with_max_price("50");

        assert!(criteria.matches(&product("A", "X", 10.0)));
        assert!(criteria.matches(&product("B", "X", 50.0)));
        assert!(!criteria.matches(&product("C", "X", 9.99)));
        assert!(!criteria.matches(&product("D", "X", 50.01)));
    }

    #[test]
    fn test_malformed_price_deactivates_only_that_bound() {
        let criteria = QueryCriteria::new()
            .with_min_price("not-a-number")
            .with_max_price("50");

        assert_eq!(criteria.min_price(), None);
        assert_eq!(criteria.max_price(), Some(50.0));
        // The broken lower bound excludes nothing.
        assert!(criteria.matches(&product("Cheap", "X", 0.5)));
        assert!(!criteria.matches(&product("Dear", "X", 99.0)));
    }

    #[test]
    fn test_status_filter_uses_display_string() {
        let criteria = QueryCriteria::new().with_status("Out of Stock");
        let mut sold_out = product("Gone", "X", 5.0);
        sold_out.status = ProductStatus::OutOfStock;

        assert!(criteria.matches(&sold_out));
        assert!(!criteria.matches(&product("Here", "X", 5.0)));
    }

    #[test]
    fn test_sort_key_roundtrip() {
        assert_eq!(SortKey::from_str("rating-high"), Some(SortKey::RatingDesc));
        assert_eq!(SortKey::from_str("rating-low"), Some(SortKey::RatingAsc));
        assert_eq!(SortKey::from_str("price-low"), None);
        assert_eq!(SortKey::RatingDesc.as_str(), "rating-high");
    }
}
