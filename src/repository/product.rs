use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product, ProductUpdate};
use crate::domain::types::{ProductId, TypeConstraintError};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdatedProduct as DbUpdatedProduct,
};
use crate::models::product_image::ProductImage as DbProductImage;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        use crate::schema::{categories, product_images, products};

        let mut conn = self.conn()?;

        let rows: Vec<(DbProduct, String)> = products::table
            .inner_join(categories::table)
            .select((products::all_columns, categories::name))
            .order(products::id.asc())
            .load(&mut conn)?;

        let (db_products, category_names): (Vec<DbProduct>, Vec<String>) =
            rows.into_iter().unzip();

        let images = DbProductImage::belonging_to(&db_products)
            .order(product_images::id.asc())
            .load::<DbProductImage>(&mut conn)?
            .grouped_by(&db_products);

        let items = db_products
            .into_iter()
            .zip(category_names)
            .zip(images)
            .map(|((product, category), images)| product.into_domain(category, images))
            .collect::<Result<Vec<Product>, TypeConstraintError>>()?;

        Ok(items)
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::{categories, product_images, products};

        let mut conn = self.conn()?;

        let row: Option<(DbProduct, String)> = products::table
            .inner_join(categories::table)
            .filter(products::id.eq(id.get()))
            .select((products::all_columns, categories::name))
            .first(&mut conn)
            .optional()?;

        match row {
            Some((product, category)) => {
                let images = DbProductImage::belonging_to(&product)
                    .order(product_images::id.asc())
                    .load::<DbProductImage>(&mut conn)?;
                Ok(Some(product.into_domain(category, images)?))
            }
            None => Ok(None),
        }
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<ProductId> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product: DbNewProduct = product.clone().into();

        let created: DbProduct = diesel::insert_into(products::table)
            .values(db_product)
            .get_result(&mut conn)?;

        Ok(ProductId::new(created.id)?)
    }

    fn update_product(&self, id: ProductId, update: &ProductUpdate) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let changes: DbUpdatedProduct = update.clone().into();

        let affected = diesel::update(products::table.filter(products::id.eq(id.get())))
            .set((changes, products::updated_at.eq(diesel::dsl::now)))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;

        // Images are deleted in the same transaction so a product never
        // disappears while its rows linger.
        let affected = conn.transaction(|conn| {
            diesel::delete(
                product_images::table.filter(product_images::product_id.eq(id.get())),
            )
            .execute(conn)?;

            diesel::delete(products::table.filter(products::id.eq(id.get()))).execute(conn)
        })?;

        Ok(affected)
    }

    fn set_product_featured(&self, id: ProductId, featured: bool) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let affected = diesel::update(products::table.filter(products::id.eq(id.get())))
            .set((
                products::featured.eq(featured),
                products::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
