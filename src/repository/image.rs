use diesel::prelude::*;

use crate::domain::product::ProductImage;
use crate::domain::types::{ImageUrl, ProductId};
use crate::models::product_image::{
    NewProductImage as DbNewProductImage, ProductImage as DbProductImage,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProductImageReader, ProductImageWriter};

impl ProductImageReader for DieselRepository {
    fn list_images_for_product(
        &self,
        product_id: ProductId,
    ) -> RepositoryResult<Vec<ProductImage>> {
        use crate::schema::product_images;

        let mut conn = self.conn()?;

        let items = product_images::table
            .filter(product_images::product_id.eq(product_id.get()))
            .order(product_images::id.asc())
            .load::<DbProductImage>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<ProductImage>, _>>()?;

        Ok(items)
    }
}

impl ProductImageWriter for DieselRepository {
    fn create_image(&self, product_id: ProductId, url: &ImageUrl) -> RepositoryResult<usize> {
        use crate::schema::product_images;

        let mut conn = self.conn()?;

        let affected = diesel::insert_into(product_images::table)
            .values(DbNewProductImage {
                product_id: product_id.get(),
                url: url.as_str().to_string(),
            })
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_images_by_url(&self, urls: &[ImageUrl]) -> RepositoryResult<usize> {
        use crate::schema::product_images;

        if urls.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            product_images::table
                .filter(product_images::url.eq_any(urls.iter().map(ImageUrl::as_str))),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
