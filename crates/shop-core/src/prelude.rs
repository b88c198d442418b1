//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use shop_core::prelude::*;
//! ```

// Catalog
pub use shop_catalog::catalog::{
    validate, FieldErrors, ImageAttachment, Product, ProductForm, ProductRepository,
    ProductStatus, ValidatedProduct, DEFAULT_RATING,
};
pub use shop_catalog::ids::{ProductId, SubscriptionId, UserId};
pub use shop_catalog::search::{
    QueryCriteria, QueryResults, Pagination, SortKey, FILTER_ALL, PAGE_SIZE,
};
pub use shop_catalog::CatalogError;

// Auth
pub use shop_auth::{
    AuthError, Identity, IdentityProvider, MemoryProvider, SessionState, SessionStore,
};

// Core types
pub use crate::{BlobStore, MemoryBlobStore, StoreApp, StoreConfig, SubmitError, UploadError};
