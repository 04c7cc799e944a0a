use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductUpdate,
};
use crate::domain::types::{
    CategoryId, CategoryName, ImageUrl, ProductDescription, ProductId, ProductName, ProductPrice,
    ProductSku, TypeConstraintError,
};
use crate::models::product_image::ProductImage;

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub description: Option<String>,
    pub featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Builds the domain entity from a row plus the joined category name
    /// and the product's image rows.
    pub fn into_domain(
        self,
        category: String,
        images: Vec<ProductImage>,
    ) -> Result<DomainProduct, TypeConstraintError> {
        Ok(DomainProduct {
            id: ProductId::new(self.id)?,
            category_id: CategoryId::new(self.category_id)?,
            category: CategoryName::new(category)?,
            name: ProductName::new(self.name)?,
            sku: ProductSku::new(self.sku)?,
            price: ProductPrice::new(self.price)?,
            description: self.description.map(ProductDescription::new).transpose()?,
            featured: self.featured,
            created_at: self.created_at,
            updated_at: self.updated_at,
            images: images
                .into_iter()
                .map(|image| ImageUrl::new(image.url))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Insertable form of [`Product`]. `featured` is left to its column default.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub category_id: i32,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<DomainNewProduct> for NewProduct {
    fn from(product: DomainNewProduct) -> Self {
        Self {
            category_id: product.category_id.get(),
            name: product.name.into_inner(),
            sku: product.sku.into_inner(),
            price: product.price.get(),
            description: product.description.map(ProductDescription::into_inner),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Patch form applied by the edit flow. `updated_at` is set in the query.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::products, treat_none_as_null = true)]
pub struct UpdatedProduct {
    pub category_id: i32,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub description: Option<String>,
}

impl From<ProductUpdate> for UpdatedProduct {
    fn from(update: ProductUpdate) -> Self {
        Self {
            category_id: update.category_id.get(),
            name: update.name.into_inner(),
            sku: update.sku.into_inner(),
            price: update.price.get(),
            description: update.description.map(ProductDescription::into_inner),
        }
    }
}
