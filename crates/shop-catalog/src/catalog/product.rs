//! Product types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Rating assigned to products that have not been reviewed yet.
pub const DEFAULT_RATING: f64 = 4.0;

/// Availability status shown on a product listing.
///
/// This is a closed set; free-form taxonomy lives in `category`, `brand`
/// and `color` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductStatus {
    /// Product can be ordered.
    #[default]
    #[serde(rename = "Available")]
    Available,
    /// Product is listed but currently sold out.
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    /// Product is announced but not yet orderable.
    #[serde(rename = "Coming Soon")]
    ComingSoon,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Available => "Available",
            ProductStatus::OutOfStock => "Out of Stock",
            ProductStatus::ComingSoon => "Coming Soon",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(ProductStatus::Available),
            "Out of Stock" => Some(ProductStatus::OutOfStock),
            "Coming Soon" => Some(ProductStatus::ComingSoon),
            _ => None,
        }
    }

    /// All members of the closed set, in display order.
    pub fn all() -> [ProductStatus; 3] {
        [
            ProductStatus::Available,
            ProductStatus::OutOfStock,
            ProductStatus::ComingSoon,
        ]
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sellable item in the catalog.
///
/// Instances are created by [`ProductRepository::add`] and never mutated
/// afterwards; there is no update or delete path.
///
/// `in_stock` and `status` are independent fields. They can disagree (an
/// "Available" product may have `in_stock == false`) and callers must not
/// assume consistency between them.
///
/// [`ProductRepository::add`]: crate::catalog::ProductRepository::add
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier, assigned at insert.
    pub id: ProductId,
    /// Stock keeping unit, stored upper-cased; unique across the catalog.
    pub sku: String,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Units on hand.
    pub quantity: u32,
    /// Free-form category label.
    pub category: String,
    /// Free-form brand label.
    pub brand: String,
    /// Free-form color label.
    pub color: String,
    /// Availability status.
    pub status: ProductStatus,
    /// Display rating; comparable but carries no invariant.
    pub rating: f64,
    /// Optional image URL.
    pub image: Option<String>,
    /// Stock flag, independent of `status`.
    pub in_stock: bool,
    /// Unix timestamp of insertion.
    pub created_at: i64,
}

/// Product data that has passed the validation gate.
///
/// Build instances through [`validate`]; the repository trusts the fields
/// as-is (in particular, `sku` is expected to be trimmed and upper-cased).
///
/// [`validate`]: crate::catalog::validate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidatedProduct {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub sku: String,
    pub category: String,
    pub brand: String,
    pub color: String,
    pub status: ProductStatus,
    pub rating: f64,
    pub image: Option<String>,
    pub in_stock: bool,
}

impl ValidatedProduct {
    /// Replace the image URL, e.g. after an attachment upload.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Override the initial rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }
}

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
