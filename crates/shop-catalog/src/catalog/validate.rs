//! Validation gate for product creation input.
//!
//! Pure input checking: nothing here touches the repository or performs
//! I/O. A form either comes back as a [`ValidatedProduct`] ready for
//! insertion or as [`FieldErrors`] the caller can surface next to the
//! offending fields.

use crate::catalog::product::{ProductStatus, ValidatedProduct, DEFAULT_RATING};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Longest accepted product name, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Largest accepted image attachment, in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Per-field validation messages, first violation wins per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation unless the field already has one.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Get the message recorded for a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", joined.join("; "))
    }
}

/// An image file attached to a product form, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Original file name.
    pub file_name: String,
    /// MIME type reported for the file.
    pub media_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }
}

/// Raw product-creation input, exactly as collected from the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub sku: String,
    pub category: String,
    pub brand: String,
    pub color: String,
    /// Status as entered; must name a member of the closed set.
    pub status: String,
    pub in_stock: bool,
    /// Pre-existing image URL, if the caller already has one.
    pub image_url: Option<String>,
    /// Image file to upload alongside the product.
    pub attachment: Option<ImageAttachment>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self {
            status: ProductStatus::Available.as_str().to_string(),
            in_stock: true,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
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

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_attachment(mut self, attachment: ImageAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// Check a form against the creation rules.
///
/// Returns the normalized product data (name/color trimmed, SKU trimmed and
/// upper-cased, status parsed) or the full set of per-field messages.
pub fn validate(form: &ProductForm) -> Result<ValidatedProduct, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.push("name", "Name is required");
    } else if name.chars().count() > MAX_NAME_CHARS {
        errors.push("name", "Name must be less than 100 characters");
    } else if !name.chars().all(is_name_char) {
        errors.push(
            "name",
            "Name can only contain letters, numbers, spaces, hyphens, and apostrophes",
        );
    }

    if !(form.price.is_finite() && form.price > 0.0) {
        errors.push("price", "Price must be positive");
    }

    let quantity = if form.quantity < 0 || form.quantity > u32::MAX as i64 {
        errors.push("quantity", "Quantity must be a non-negative integer");
        0
    } else {
        form.quantity as u32
    };

    let sku = form.sku.trim().to_uppercase();
    if sku.is_empty() {
        errors.push("sku", "SKU is required");
    }

    if form.category.is_empty() {
        errors.push("category", "Category is required");
    }
    if form.brand.is_empty() {
        errors.push("brand", "Brand is required");
    }

    let color = form.color.trim();
    if color.is_empty() {
        errors.push("color", "Color is required");
    }

    let status = match ProductStatus::from_str(&form.status) {
        Some(status) => status,
        None => {
            errors.push(
                "status",
                "Status must be one of: Available, Out of Stock, Coming Soon",
            );
            ProductStatus::Available
        }
    };

    if let Some(attachment) = &form.attachment {
        if !attachment.media_type.starts_with("image/") {
            errors.push("imageFile", "Only image files are allowed.");
        } else if attachment.bytes.len() > MAX_IMAGE_BYTES {
            errors.push("imageFile", "Image size must be less than 5MB.");
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedProduct {
        name: name.to_string(),
        price: form.price,
        quantity,
        sku,
        category: form.category.clone(),
        brand: form.brand.clone(),
        color: color.to_string(),
        status,
        rating: DEFAULT_RATING,
        image: form.image_url.clone(),
        in_stock: form.in_stock,
    })
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-' || c == '\''
}
