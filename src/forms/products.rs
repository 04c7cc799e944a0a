//! Product create/edit form: two-phase validation and conversion into a
//! typed payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::types::{
    CategoryName, ImageUrl, PRODUCT_NAME_MAX_CHARS, PRODUCT_PRICE_MAX, PRODUCT_SKU_CHARS,
    ProductDescription, ProductName, ProductPrice, ProductSku, TypeConstraintError,
};

pub const REQUIRED_MESSAGE_CREATE: &str = "You must fill this out";
pub const REQUIRED_MESSAGE_EDIT: &str = "This field is required.";
pub const NAME_TOO_LONG_MESSAGE: &str = "Name can't be longer than 100 characters.";
pub const SKU_LENGTH_MESSAGE: &str = "Sku must be 8 characters long. Numbers and letters only.";
pub const PRICE_RANGE_MESSAGE: &str = "Price can't be negative, and must be under 9999.99";

/// Field-keyed validation messages, rendered next to the form inputs.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Which flow a submission belongs to. The flows share all checks and
/// differ only in the required-field message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Edit,
}

impl ValidationMode {
    fn required_message(self) -> &'static str {
        match self {
            ValidationMode::Create => REQUIRED_MESSAGE_CREATE,
            ValidationMode::Edit => REQUIRED_MESSAGE_EDIT,
        }
    }
}

/// Raw urlencoded fields of the product create/edit form.
///
/// Every field defaults to the empty string so a missing key and an empty
/// submission are indistinguishable, matching how the templates post.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_1: String,
    #[serde(default)]
    pub image_2: String,
    #[serde(default)]
    pub image_3: String,
}

impl ProductForm {
    /// Two-phase validation.
    ///
    /// Phase 1 checks that `name`, `sku` and `price` are non-empty; if any
    /// is missing the content checks are skipped entirely. Phase 2 checks
    /// name length, sku length and price range. A price that cannot be
    /// parsed as a number is not a form error: it aborts the submission
    /// with [`TypeConstraintError::InvalidNumber`].
    pub fn validate(&self, mode: ValidationMode) -> Result<FieldErrors, TypeConstraintError> {
        let mut errors = FieldErrors::new();

        for (field, value) in [
            ("name", &self.name),
            ("sku", &self.sku),
            ("price", &self.price),
        ] {
            if value.is_empty() {
                errors.insert(field, mode.required_message().to_string());
            }
        }

        if !errors.is_empty() {
            return Ok(errors);
        }

        if self.name.chars().count() > PRODUCT_NAME_MAX_CHARS {
            errors.insert("name", NAME_TOO_LONG_MESSAGE.to_string());
        }

        if self.sku.chars().count() != PRODUCT_SKU_CHARS {
            errors.insert("sku", SKU_LENGTH_MESSAGE.to_string());
        }

        let price = self.parse_price()?;
        if !(0.0..=PRODUCT_PRICE_MAX).contains(&price) {
            errors.insert("price", PRICE_RANGE_MESSAGE.to_string());
        }

        Ok(errors)
    }

    /// Converts a validated form into its typed payload.
    ///
    /// Must only be called after [`Self::validate`] returned no errors;
    /// the value-object constructors re-enforce the same constraints.
    pub fn into_payload(self) -> Result<ProductFormPayload, TypeConstraintError> {
        let price = self.parse_price()?;

        let mut images: Vec<ImageUrl> = Vec::new();
        for slot in [self.image_1, self.image_2, self.image_3] {
            if slot.is_empty() {
                continue;
            }
            let url = ImageUrl::new(slot)?;
            // A URL repeated across slots yields a single image.
            if !images.contains(&url) {
                images.push(url);
            }
        }

        Ok(ProductFormPayload {
            name: ProductName::new(self.name)?,
            sku: ProductSku::new(self.sku)?,
            price: ProductPrice::new(price)?,
            category: CategoryName::new(self.category)?,
            description: if self.description.is_empty() {
                None
            } else {
                Some(ProductDescription::new(self.description)?)
            },
            images,
        })
    }

    fn parse_price(&self) -> Result<f64, TypeConstraintError> {
        self.price
            .trim()
            .parse::<f64>()
            .map_err(|_| TypeConstraintError::InvalidNumber("price"))
    }
}

/// Prefill for the edit form from the persisted product.
impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        let slot = |index: usize| {
            product
                .images
                .get(index)
                .map(|url| url.as_str().to_string())
                .unwrap_or_default()
        };
        Self {
            name: product.name.as_str().to_string(),
            sku: product.sku.as_str().to_string(),
            price: product.price.to_string(),
            category: product.category.as_str().to_string(),
            description: product
                .description
                .as_ref()
                .map(|description| description.as_str().to_string())
                .unwrap_or_default(),
            image_1: slot(0),
            image_2: slot(1),
            image_3: slot(2),
        }
    }
}

/// Typed product submission: validated fields plus the non-empty image
/// slots in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFormPayload {
    pub name: ProductName,
    pub sku: ProductSku,
    pub price: ProductPrice,
    pub category: CategoryName,
    pub description: Option<ProductDescription>,
    pub images: Vec<ImageUrl>,
}
