use std::cell::{Cell, RefCell};

use crate::domain::category::Category;
use crate::domain::product::{NewProduct, Product, ProductImage, ProductUpdate};
use crate::domain::types::{CategoryName, ImageUrl, ProductId, ProductImageId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CategoryReader, ProductImageReader, ProductImageWriter, ProductReader, ProductWriter,
};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    categories: Vec<Category>,
    products: RefCell<Vec<Product>>,
    images: RefCell<Vec<ProductImage>>,
    next_product_id: Cell<i32>,
    next_image_id: Cell<i32>,
}

impl TestRepository {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            products: RefCell::new(Vec::new()),
            images: RefCell::new(Vec::new()),
            next_product_id: Cell::new(1),
            next_image_id: Cell::new(1),
        }
    }

    /// Raw image rows, for asserting on reconciliation outcomes.
    pub fn image_rows(&self) -> Vec<ProductImage> {
        self.images.borrow().clone()
    }

    fn with_images(&self, mut product: Product) -> Product {
        product.images = self
            .images
            .borrow()
            .iter()
            .filter(|image| image.product_id == product.id)
            .map(|image| image.url.clone())
            .collect();
        product
    }

    fn category_name(&self, id: crate::domain::types::CategoryId) -> CategoryName {
        self.categories
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.clone())
            .expect("category referenced by a product must exist")
    }
}

impl ProductReader for TestRepository {
    fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self
            .products
            .borrow()
            .iter()
            .cloned()
            .map(|product| self.with_images(product))
            .collect())
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        Ok(self
            .products
            .borrow()
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .map(|product| self.with_images(product)))
    }
}

impl ProductWriter for TestRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<ProductId> {
        let id = ProductId::new(self.next_product_id.get()).expect("test ids are positive");
        self.next_product_id.set(id.get() + 1);

        self.products.borrow_mut().push(Product {
            id,
            category_id: product.category_id,
            category: self.category_name(product.category_id),
            name: product.name.clone(),
            sku: product.sku.clone(),
            price: product.price,
            description: product.description.clone(),
            featured: false,
            created_at: product.created_at,
            updated_at: product.updated_at,
            images: Vec::new(),
        });

        Ok(id)
    }

    fn update_product(&self, id: ProductId, update: &ProductUpdate) -> RepositoryResult<usize> {
        let mut products = self.products.borrow_mut();
        match products.iter_mut().find(|product| product.id == id) {
            Some(product) => {
                product.category_id = update.category_id;
                product.category = self.category_name(update.category_id);
                product.name = update.name.clone();
                product.sku = update.sku.clone();
                product.price = update.price;
                product.description = update.description.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        let mut products = self.products.borrow_mut();
        let before = products.len();
        products.retain(|product| product.id != id);
        self.images
            .borrow_mut()
            .retain(|image| image.product_id != id);
        Ok(before - products.len())
    }

    fn set_product_featured(&self, id: ProductId, featured: bool) -> RepositoryResult<usize> {
        let mut products = self.products.borrow_mut();
        match products.iter_mut().find(|product| product.id == id) {
            Some(product) => {
                product.featured = featured;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .iter()
            .find(|category| &category.name == name)
            .cloned())
    }
}

impl ProductImageReader for TestRepository {
    fn list_images_for_product(
        &self,
        product_id: ProductId,
    ) -> RepositoryResult<Vec<ProductImage>> {
        Ok(self
            .images
            .borrow()
            .iter()
            .filter(|image| image.product_id == product_id)
            .cloned()
            .collect())
    }
}

impl ProductImageWriter for TestRepository {
    fn create_image(&self, product_id: ProductId, url: &ImageUrl) -> RepositoryResult<usize> {
        let id = ProductImageId::new(self.next_image_id.get()).expect("test ids are positive");
        self.next_image_id.set(id.get() + 1);

        self.images.borrow_mut().push(ProductImage {
            id,
            product_id,
            url: url.clone(),
        });

        Ok(1)
    }

    fn delete_images_by_url(&self, urls: &[ImageUrl]) -> RepositoryResult<usize> {
        // Unscoped by product, like the real implementation.
        let mut images = self.images.borrow_mut();
        let before = images.len();
        images.retain(|image| !urls.contains(&image.url));
        Ok(before - images.len())
    }
}
