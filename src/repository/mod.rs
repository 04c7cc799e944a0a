use crate::db::{DbConnection, DbPool};
use crate::domain::category::Category;
use crate::domain::product::{NewProduct, Product, ProductImage, ProductUpdate};
use crate::domain::types::{CategoryName, ImageUrl, ProductId};
use crate::repository::errors::RepositoryResult;

pub mod errors;

mod category;
mod image;
mod product;
#[cfg(test)]
pub mod test;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List all products in default (ascending id) order, with their
    /// category names and image URLs resolved.
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
}

/// Write operations for product entities.
pub trait ProductWriter {
    /// Persist a new product, returning its identifier.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<ProductId>;
    /// Apply field changes to an existing product.
    fn update_product(&self, id: ProductId, update: &ProductUpdate) -> RepositoryResult<usize>;
    /// Delete a product together with its images.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize>;
    /// Set the featured flag on a product.
    fn set_product_featured(&self, id: ProductId, featured: bool) -> RepositoryResult<usize>;
}

/// Read-only operations for category entities. Categories are never
/// written by this application.
pub trait CategoryReader {
    /// List all categories in name order.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its exact name.
    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>>;
}

/// Read-only operations for product images.
pub trait ProductImageReader {
    /// List the images attached to a product in insertion order.
    fn list_images_for_product(&self, product_id: ProductId)
    -> RepositoryResult<Vec<ProductImage>>;
}

/// Write operations for product images.
pub trait ProductImageWriter {
    /// Attach an image URL to a product.
    fn create_image(&self, product_id: ProductId, url: &ImageUrl) -> RepositoryResult<usize>;
    /// Bulk-delete images whose URL is in `urls`.
    ///
    /// Deletion is keyed by URL value alone, not by owning product; two
    /// products sharing a URL are both affected. This mirrors the legacy
    /// reconciliation behavior.
    fn delete_images_by_url(&self, urls: &[ImageUrl]) -> RepositoryResult<usize>;
}
