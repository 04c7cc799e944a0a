use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, CategoryName, ImageUrl, ProductDescription, ProductId, ProductImageId, ProductName,
    ProductPrice, ProductSku,
};

/// A catalog product together with its attached image URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    /// Name of the owning category, resolved on load.
    pub category: CategoryName,
    pub name: ProductName,
    pub sku: ProductSku,
    pub price: ProductPrice,
    pub description: Option<ProductDescription>,
    pub featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub images: Vec<ImageUrl>,
}

/// Information required to create a new [`Product`].
///
/// `featured` is absent: new products always start out not featured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub category_id: CategoryId,
    pub name: ProductName,
    pub sku: ProductSku,
    pub price: ProductPrice,
    pub description: Option<ProductDescription>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Field changes applied to an existing [`Product`] by the edit flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductUpdate {
    pub category_id: CategoryId,
    pub name: ProductName,
    pub sku: ProductSku,
    pub price: ProductPrice,
    pub description: Option<ProductDescription>,
}

/// An image attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductImage {
    pub id: ProductImageId,
    pub product_id: ProductId,
    pub url: ImageUrl,
}
