use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::ProductId;
use crate::forms::products::{FieldErrors, ProductForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::products::{
    SubmissionOutcome, create_product as create_product_service,
    delete_product as delete_product_service, show_categories as show_categories_service,
    show_product as show_product_service, show_products as show_products_service,
    toggle_featured as toggle_featured_service, update_product as update_product_service,
};

#[get("/")]
pub async fn show_products(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_products_service(repo.get_ref()) {
        Ok((products, featured_products)) => {
            let mut context = base_context(&flash_messages, "products");
            context.insert("products", &products);
            context.insert("featured_products", &featured_products);
            render_template(&tera, "products/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render product list: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/new")]
pub async fn show_create_form(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_categories_service(repo.get_ref()) {
        Ok(categories) => {
            let mut context = base_context(&flash_messages, "create_product");
            context.insert("categories", &categories);
            context.insert("errors", &FieldErrors::new());
            context.insert("payload", &ProductForm::default());
            render_template(&tera, "products/create.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render create product form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/new")]
pub async fn create_product(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ProductForm>,
) -> impl Responder {
    match create_product_service(form.clone(), repo.get_ref()) {
        Ok(SubmissionOutcome::Saved) => {
            FlashMessage::success("Product created.").send();
            redirect("/")
        }
        Ok(SubmissionOutcome::Invalid(errors)) => {
            let categories = match show_categories_service(repo.get_ref()) {
                Ok(categories) => categories,
                Err(err) => {
                    log::error!("Failed to load categories for create form: {err}");
                    return HttpResponse::InternalServerError().finish();
                }
            };
            let mut context = base_context(&flash_messages, "create_product");
            context.insert("categories", &categories);
            context.insert("errors", &errors);
            context.insert("payload", &form);
            render_template(&tera, "products/create.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to create product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{product_id}/edit")]
pub async fn show_edit_form(
    product_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = match ProductId::new(product_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let product = match show_product_service(product_id, repo.get_ref()) {
        Ok(product) => product,
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load product for edit: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match show_categories_service(repo.get_ref()) {
        Ok(categories) => {
            let mut context = base_context(&flash_messages, "edit_product");
            context.insert("categories", &categories);
            context.insert("images", &product.images);
            context.insert("errors", &FieldErrors::new());
            context.insert("payload", &ProductForm::from(&product));
            context.insert("product", &product);
            render_template(&tera, "products/edit.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render edit product form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/edit")]
pub async fn update_product(
    product_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ProductForm>,
) -> impl Responder {
    let product_id = match ProductId::new(product_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match update_product_service(product_id, form.clone(), repo.get_ref()) {
        Ok(SubmissionOutcome::Saved) => {
            FlashMessage::success("Product updated.").send();
            redirect("/")
        }
        Ok(SubmissionOutcome::Invalid(errors)) => {
            let product = match show_product_service(product_id, repo.get_ref()) {
                Ok(product) => product,
                Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
                Err(err) => {
                    log::error!("Failed to reload product for edit form: {err}");
                    return HttpResponse::InternalServerError().finish();
                }
            };
            let categories = match show_categories_service(repo.get_ref()) {
                Ok(categories) => categories,
                Err(err) => {
                    log::error!("Failed to load categories for edit form: {err}");
                    return HttpResponse::InternalServerError().finish();
                }
            };
            let mut context = base_context(&flash_messages, "edit_product");
            context.insert("categories", &categories);
            context.insert("images", &product.images);
            context.insert("product", &product);
            context.insert("errors", &errors);
            context.insert("payload", &form);
            render_template(&tera, "products/edit.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to update product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{product_id}/delete")]
pub async fn show_delete_confirmation(
    product_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = match ProductId::new(product_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match show_product_service(product_id, repo.get_ref()) {
        Ok(product) => {
            let mut context = base_context(&flash_messages, "delete_product");
            context.insert("product", &product);
            render_template(&tera, "products/delete.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render delete confirmation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = match ProductId::new(product_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match delete_product_service(product_id, repo.get_ref()) {
        Ok(()) => {
            FlashMessage::success("Product deleted.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/featured")]
pub async fn toggle_featured(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = match ProductId::new(product_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match toggle_featured_service(product_id, repo.get_ref()) {
        Ok(()) => redirect("/"),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to toggle featured flag: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
