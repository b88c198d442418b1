//! Product catalog state and query pipeline for ShopStore.
//!
//! This crate provides the catalog half of the ShopStore state layer:
//!
//! - **Catalog**: product types, the validation gate, and the in-memory
//!   repository with SKU-uniqueness enforcement and insert subscriptions
//! - **Search**: pure filter/sort/paginate evaluation over a catalog
//!   snapshot, plus facet derivation for filter controls
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_catalog::prelude::*;
//!
//! let repo = ProductRepository::new();
//! let validated = validate(
//!     &ProductForm::new()
//!         .with_name("Wireless Mouse")
//!         .with_price(24.99)
//!         .with_quantity(12)
//!         .with_sku("MOU-001")
//!         .with_category("Electronics")
//!         .with_brand("Logi")
//!         .with_color("Black"),
//! )?;
//! let product = repo.add(validated)?;
//!
//! let page = search::run(
//!     &repo.list(),
//!     &QueryCriteria::new().with_category("Electronics"),
//! );
//! assert_eq!(page.items[0].id, product.id);
//! ```

pub mod catalog;
pub mod error;
pub mod ids;
pub mod search;

pub use error::CatalogError;
pub use ids::{ProductId, SubscriptionId, UserId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::{ProductId, SubscriptionId, UserId};

    // Catalog
    pub use crate::catalog::{
        validate, FieldErrors, ImageAttachment, Product, ProductForm, ProductRepository,
        ProductStatus, ValidatedProduct, DEFAULT_RATING,
    };

    // Search
    pub use crate::search::{
        self, QueryCriteria, QueryResults, Pagination, SortKey, FILTER_ALL, PAGE_SIZE,
    };
}
