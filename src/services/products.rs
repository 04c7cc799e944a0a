use chrono::Utc;

use crate::domain::category::Category;
use crate::domain::product::{NewProduct, Product, ProductUpdate};
use crate::domain::types::{ImageUrl, ProductId};
use crate::forms::products::{FieldErrors, ProductForm, ProductFormPayload, ValidationMode};
use crate::repository::{
    CategoryReader, ProductImageReader, ProductImageWriter, ProductReader, ProductWriter,
};

use super::{ServiceError, ServiceResult};

/// At most this many featured products are highlighted on the list page.
pub const FEATURED_LIMIT: usize = 4;

/// Result of a create/edit submission that passed the fatal checks.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The product was persisted; redirect to the list.
    Saved,
    /// Validation failed; re-render the form with these messages and the
    /// submitted values. Nothing was persisted.
    Invalid(FieldErrors),
}

/// Core business logic for the product list page.
///
/// Returns all products in store order plus the highlighted subset: the
/// first [`FEATURED_LIMIT`] products carrying the featured flag.
pub fn show_products<R>(repo: &R) -> ServiceResult<(Vec<Product>, Vec<Product>)>
where
    R: ProductReader,
{
    let products = match repo.list_products() {
        Ok(products) => products,
        Err(e) => {
            log::error!("Failed to list products: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let featured = products
        .iter()
        .filter(|product| product.featured)
        .take(FEATURED_LIMIT)
        .cloned()
        .collect();

    Ok((products, featured))
}

/// Fetches the categories offered by the create/edit form selects.
pub fn show_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Loads a single product for the edit and delete views.
pub fn show_product<R>(product_id: ProductId, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    match repo.get_product_by_id(product_id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Create flow: validate, resolve the category, persist the product and
/// its submitted image URLs.
pub fn create_product<R>(form: ProductForm, repo: &R) -> ServiceResult<SubmissionOutcome>
where
    R: CategoryReader + ProductWriter + ProductImageWriter,
{
    let payload = match prepare_submission(form, ValidationMode::Create)? {
        Prepared::Payload(payload) => payload,
        Prepared::Invalid(errors) => return Ok(SubmissionOutcome::Invalid(errors)),
    };

    let category = resolve_category(&payload, repo)?;

    let now = Utc::now().naive_utc();
    let new_product = NewProduct {
        category_id: category.id,
        name: payload.name,
        sku: payload.sku,
        price: payload.price,
        description: payload.description,
        created_at: now,
        updated_at: now,
    };

    let product_id = match repo.create_product(&new_product) {
        Ok(id) => id,
        Err(e) => {
            log::error!("Failed to create product: {e}");
            return Err(ServiceError::Internal);
        }
    };

    for url in &payload.images {
        if let Err(e) = repo.create_image(product_id, url) {
            log::error!("Failed to create product image: {e}");
            return Err(ServiceError::Internal);
        }
    }

    Ok(SubmissionOutcome::Saved)
}

/// Edit flow: validate, apply the fields, then reconcile the image set
/// against the submitted slots.
pub fn update_product<R>(
    product_id: ProductId,
    form: ProductForm,
    repo: &R,
) -> ServiceResult<SubmissionOutcome>
where
    R: ProductReader + CategoryReader + ProductWriter + ProductImageReader + ProductImageWriter,
{
    // The product must exist before anything else is looked at.
    show_product(product_id, repo)?;

    let payload = match prepare_submission(form, ValidationMode::Edit)? {
        Prepared::Payload(payload) => payload,
        Prepared::Invalid(errors) => return Ok(SubmissionOutcome::Invalid(errors)),
    };

    let category = resolve_category(&payload, repo)?;

    let update = ProductUpdate {
        category_id: category.id,
        name: payload.name,
        sku: payload.sku,
        price: payload.price,
        description: payload.description,
    };

    if let Err(e) = repo.update_product(product_id, &update) {
        log::error!("Failed to update product: {e}");
        return Err(ServiceError::Internal);
    }

    reconcile_images(product_id, &payload.images, repo)?;

    Ok(SubmissionOutcome::Saved)
}

/// Delete flow: remove the product and, through the repository, its images.
pub fn delete_product<R>(product_id: ProductId, repo: &R) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter,
{
    show_product(product_id, repo)?;

    match repo.delete_product(product_id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Flips the featured flag. Calling twice restores the original value.
pub fn toggle_featured<R>(product_id: ProductId, repo: &R) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter,
{
    let product = show_product(product_id, repo)?;

    match repo.set_product_featured(product_id, !product.featured) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to toggle featured flag: {e}");
            Err(ServiceError::Internal)
        }
    }
}

enum Prepared {
    Payload(ProductFormPayload),
    Invalid(FieldErrors),
}

/// Runs validation and, when clean, the payload conversion. An unparseable
/// price or a constraint failure inside the conversion is fatal, not a
/// form error.
fn prepare_submission(form: ProductForm, mode: ValidationMode) -> ServiceResult<Prepared> {
    let errors = match form.validate(mode) {
        Ok(errors) => errors,
        Err(e) => {
            log::error!("Rejecting product submission: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if !errors.is_empty() {
        return Ok(Prepared::Invalid(errors));
    }

    match form.into_payload() {
        Ok(payload) => Ok(Prepared::Payload(payload)),
        Err(e) => {
            log::error!("Rejecting product submission: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn resolve_category<R>(payload: &ProductFormPayload, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    match repo.get_category_by_name(&payload.category) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category by name: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Diffs the persisted image URLs against the submitted ones: URLs no
/// longer submitted are bulk-deleted by value, new URLs are created, URLs
/// present on both sides keep their existing rows.
fn reconcile_images<R>(product_id: ProductId, new_urls: &[ImageUrl], repo: &R) -> ServiceResult<()>
where
    R: ProductImageReader + ProductImageWriter,
{
    let old_urls: Vec<ImageUrl> = match repo.list_images_for_product(product_id) {
        Ok(images) => images.into_iter().map(|image| image.url).collect(),
        Err(e) => {
            log::error!("Failed to list product images: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let to_delete: Vec<ImageUrl> = old_urls
        .iter()
        .filter(|url| !new_urls.contains(url))
        .cloned()
        .collect();

    if !to_delete.is_empty() {
        if let Err(e) = repo.delete_images_by_url(&to_delete) {
            log::error!("Failed to delete product images: {e}");
            return Err(ServiceError::Internal);
        }
    }

    for url in new_urls.iter().filter(|url| !old_urls.contains(url)) {
        if let Err(e) = repo.create_image(product_id, url) {
            log::error!("Failed to create product image: {e}");
            return Err(ServiceError::Internal);
        }
    }

    Ok(())
}
