//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for a product name, in characters.
pub const PRODUCT_NAME_MAX_CHARS: usize = 100;
/// Required SKU length, in characters.
pub const PRODUCT_SKU_CHARS: usize = 8;
/// Upper bound for a product price.
pub const PRODUCT_PRICE_MAX: f64 = 9999.99;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string exceeded its maximum length.
    #[error("{0} cannot be longer than {1} characters")]
    TooLong(&'static str, usize),
    /// A string did not match its required length.
    #[error("{0} must be exactly {1} characters long")]
    BadLength(&'static str, usize),
    /// A price was not finite or fell outside [0, 9999.99].
    #[error("{0} must be between 0 and 9999.99")]
    PriceOutOfRange(&'static str),
    /// A string could not be parsed as a number.
    #[error("{0} is not a valid number")]
    InvalidNumber(&'static str),
}

fn require_non_empty(value: String, field: &'static str) -> Result<String, TypeConstraintError> {
    if value.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(value)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw identifier value.
            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

/// Macro to generate newtypes for non-empty text values.
macro_rules! text_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Rejects empty inputs. The value is stored verbatim.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                require_non_empty(value.into(), $field).map(Self)
            }

            /// Borrow the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper returning the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

id_newtype!(ProductId, "Identifier of a product.", "product id");
id_newtype!(CategoryId, "Identifier of a category.", "category id");
id_newtype!(
    ProductImageId,
    "Identifier of a product image.",
    "product image id"
);

text_newtype!(CategoryName, "Unique name of a category.", "category name");
text_newtype!(
    ProductDescription,
    "Free-form product description.",
    "description"
);
text_newtype!(ImageUrl, "URL of an image attached to a product.", "image url");

/// Product display name, non-empty and at most 100 characters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProductName(String);

impl ProductName {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = require_non_empty(value.into(), "product name")?;
        if value.chars().count() > PRODUCT_NAME_MAX_CHARS {
            return Err(TypeConstraintError::TooLong(
                "product name",
                PRODUCT_NAME_MAX_CHARS,
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ProductName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for ProductName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Stock keeping unit, exactly 8 characters.
///
/// User-facing copy promises letters and digits but the character set has
/// never been checked, only the length. Keep it that way.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProductSku(String);

impl ProductSku {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if value.chars().count() != PRODUCT_SKU_CHARS {
            return Err(TypeConstraintError::BadLength("sku", PRODUCT_SKU_CHARS));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ProductSku {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProductSku {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for ProductSku {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Product price, finite and within [0, 9999.99].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct ProductPrice(f64);

impl ProductPrice {
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && (0.0..=PRODUCT_PRICE_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::PriceOutOfRange("price"))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Display for ProductPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for ProductPrice {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductPrice> for f64 {
    fn from(value: ProductPrice) -> Self {
        value.0
    }
}

impl PartialEq<f64> for ProductPrice {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialEq<ProductPrice> for f64 {
    fn eq(&self, other: &ProductPrice) -> bool {
        *self == other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_name_rejects_empty_and_overlong() {
        assert!(ProductName::new("").is_err());
        assert!(ProductName::new("a".repeat(100)).is_ok());
        assert!(ProductName::new("a".repeat(101)).is_err());
    }

    #[test]
    fn sku_checks_length_only() {
        assert!(ProductSku::new("AB123456").is_ok());
        // Punctuation slips through on purpose.
        assert!(ProductSku::new("AB-12/3!").is_ok());
        assert!(ProductSku::new("AB12345").is_err());
        assert!(ProductSku::new("AB1234567").is_err());
    }

    #[test]
    fn price_bounds() {
        assert!(ProductPrice::new(0.0).is_ok());
        assert!(ProductPrice::new(9999.99).is_ok());
        assert!(ProductPrice::new(-0.01).is_err());
        assert!(ProductPrice::new(10000.0).is_err());
        assert!(ProductPrice::new(f64::NAN).is_err());
    }

    #[test]
    fn ids_must_be_positive() {
        assert!(ProductId::new(1).is_ok());
        assert!(ProductId::new(0).is_err());
        assert!(CategoryId::new(-1).is_err());
    }
}
