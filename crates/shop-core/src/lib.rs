//! Application assembly for the ShopStore state layer.
//!
//! This crate wires the catalog and session crates into one process-wide
//! application object:
//!
//! - [`StoreApp`]: one product repository, one session store, one blob
//!   store, constructed once at process start
//! - [`StoreApp::submit_product`]: the full product submission flow
//!   (validate, duplicate-SKU pre-check, attachment upload, atomic insert)
//! - [`BlobStore`]: the external upload contract, with an in-memory
//!   implementation for development and tests
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use shop_core::prelude::*;
//! use std::sync::Arc;
//!
//! let app = StoreApp::new(
//!     Arc::new(MemoryProvider::new()),
//!     Arc::new(MemoryBlobStore::new()),
//! );
//!
//! app.session().signup("ada@example.com", "Secret123").await?;
//!
//! let product = app
//!     .submit_product(
//!         ProductForm::new()
//!             .with_name("Wireless Mouse")
//!             .with_price(24.99)
//!             .with_quantity(12)
//!             .with_sku("MOU-001")
//!             .with_category("Electronics")
//!             .with_brand("Logi")
//!             .with_color("Black"),
//!     )
//!     .await?;
//!
//! let page = app.query(&QueryCriteria::new().with_category("Electronics"));
//! assert_eq!(page.items[0].id, product.id);
//! ```

pub mod prelude;
mod app;
mod error;
mod upload;

pub use app::{StoreApp, StoreConfig};
pub use error::SubmitError;
pub use upload::{BlobStore, MemoryBlobStore, UploadError};
