//! Product domain: types, validation gate, and the in-memory repository.

mod product;
mod repository;
mod validate;

pub use product::{Product, ProductStatus, ValidatedProduct, DEFAULT_RATING};
pub use repository::{ProductListener, ProductRepository};
pub use validate::{
    validate, FieldErrors, ImageAttachment, ProductForm, MAX_IMAGE_BYTES, MAX_NAME_CHARS,
};
