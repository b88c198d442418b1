//! Facet derivation for filter controls.

use crate::catalog::Product;
use std::collections::BTreeSet;

/// Distinct category labels in a snapshot, sorted.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    distinct(products, |p| &p.category)
}

/// Distinct brand labels in a snapshot, sorted.
pub fn distinct_brands(products: &[Product]) -> Vec<String> {
    distinct(products, |p| &p.brand)
}

fn distinct(products: &[Product], field: impl Fn(&Product) -> &String) -> Vec<String> {
    products
        .iter()
        .map(|p| field(p).clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
