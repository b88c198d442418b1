//! StoreApp configuration and assembly.

use crate::error::SubmitError;
use crate::upload::BlobStore;
use shop_auth::{IdentityProvider, SessionStore};
use shop_catalog::catalog::{validate, Product, ProductForm, ProductRepository, DEFAULT_RATING};
use shop_catalog::search::{self, QueryCriteria, QueryResults};
use std::sync::Arc;

/// Configuration for a ShopStore application.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Application name.
    pub name: String,
    /// Rating assigned to newly submitted products.
    pub default_rating: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "ShopStore".to_string(),
            default_rating: DEFAULT_RATING,
        }
    }
}

impl StoreConfig {
    /// Create a new configuration with the given app name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the rating given to new products.
    pub fn with_default_rating(mut self, rating: f64) -> Self {
        self.default_rating = rating;
        self
    }
}

/// The assembled state layer: one repository, one session store, one blob
/// store.
///
/// Construct exactly one instance at process start and share it for the
/// process lifetime; everything inside is dropped at teardown. Tests build
/// a fresh instance per case rather than sharing a global.
pub struct StoreApp {
    config: StoreConfig,
    products: Arc<ProductRepository>,
    session: Arc<SessionStore>,
    blobs: Arc<dyn BlobStore>,
}

impl StoreApp {
    /// Assemble the app with the default configuration.
    ///
    /// The session store is initialized here, registering its single
    /// subscription on the provider.
    pub fn new(provider: Arc<dyn IdentityProvider>, blobs: Arc<dyn BlobStore>) -> Self {
        Self::with_config(StoreConfig::default(), provider, blobs)
    }

    /// Assemble the app with a custom configuration.
    pub fn with_config(
        config: StoreConfig,
        provider: Arc<dyn IdentityProvider>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        let session = SessionStore::new(provider);
        session.initialize();
        tracing::info!(name = %config.name, "store app assembled");

        Self {
            config,
            products: Arc::new(ProductRepository::new()),
            session,
            blobs,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the product repository.
    pub fn products(&self) -> &Arc<ProductRepository> {
        &self.products
    }

    /// Get the session store.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Evaluate query criteria against the current catalog snapshot.
    pub fn query(&self, criteria: &QueryCriteria) -> QueryResults {
        search::run(&self.products.list(), criteria)
    }

    /// Validate, upload, and insert a product.
    ///
    /// Steps, in order:
    ///
    /// 1. validation gate — field errors come back without any side effect;
    /// 2. duplicate-SKU pre-check — runs before the upload so a rejected
    ///    submission cannot orphan a stored blob;
    /// 3. attachment upload, if the form carries one — failure aborts the
    ///    submission with no repository change;
    /// 4. insert — the repository re-checks the SKU atomically, so a
    ///    concurrent submission of the same SKU still cannot slip through.
    pub async fn submit_product(&self, form: ProductForm) -> Result<Product, SubmitError> {
        let mut validated = validate(&form)?.with_rating(self.config.default_rating);

        if let Some(existing) = self.products.get_by_sku(&validated.sku) {
            tracing::warn!(sku = %existing.sku, "submission rejected before upload: duplicate SKU");
            return Err(shop_catalog::CatalogError::DuplicateSku(existing.sku).into());
        }

        if let Some(attachment) = &form.attachment {
            let url = self
                .blobs
                .upload(&attachment.bytes, &attachment.file_name)
                .await?;
            validated = validated.with_image(url);
        }

        let product = self.products.add(validated)?;
        tracing::info!(id = %product.id, sku = %product.sku, "product submitted");
        Ok(product)
    }
}
