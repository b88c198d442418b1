//! Catalog error types.

use crate::catalog::FieldErrors;
use thiserror::Error;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Another product already holds this SKU (compared case-insensitively).
    #[error("SKU already exists: {0}")]
    DuplicateSku(String),

    /// Input was rejected by the validation gate.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
}

impl CatalogError {
    /// The offending SKU, when this is a duplicate-SKU rejection.
    pub fn duplicate_sku(&self) -> Option<&str> {
        match self {
            CatalogError::DuplicateSku(sku) => Some(sku),
            _ => None,
        }
    }

    /// The per-field messages, when this is a validation rejection.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            CatalogError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for CatalogError {
    fn from(errors: FieldErrors) -> Self {
        CatalogError::Validation(errors)
    }
}
