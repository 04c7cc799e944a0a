use diesel::prelude::*;

use crate::domain::product::ProductImage as DomainProductImage;
use crate::domain::types::{ImageUrl, ProductId, ProductImageId, TypeConstraintError};
use crate::models::product::Product;

/// Diesel model representing the `product_images` table.
#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(table_name = crate::schema::product_images)]
#[diesel(belongs_to(Product, foreign_key = product_id))]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub url: String,
}

/// Insertable form of [`ProductImage`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage {
    pub product_id: i32,
    pub url: String,
}

impl TryFrom<ProductImage> for DomainProductImage {
    type Error = TypeConstraintError;

    fn try_from(image: ProductImage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductImageId::new(image.id)?,
            product_id: ProductId::new(image.product_id)?,
            url: ImageUrl::new(image.url)?,
        })
    }
}
