//! Error types for product submission.

use crate::upload::UploadError;
use shop_catalog::catalog::FieldErrors;
use shop_catalog::CatalogError;
use thiserror::Error;

/// Errors surfaced by the product submission flow.
///
/// All variants are recoverable by the caller: fix the input, pick another
/// SKU, or retry the upload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// Validation or uniqueness rejection from the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Image upload failed; the product was not inserted.
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl SubmitError {
    /// Per-field validation messages, when the form was rejected.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Catalog(err) => err.field_errors(),
            _ => None,
        }
    }

    /// The offending SKU, when a duplicate was rejected.
    pub fn duplicate_sku(&self) -> Option<&str> {
        match self {
            SubmitError::Catalog(err) => err.duplicate_sku(),
            _ => None,
        }
    }
}

impl From<FieldErrors> for SubmitError {
    fn from(errors: FieldErrors) -> Self {
        SubmitError::Catalog(CatalogError::Validation(errors))
    }
}
