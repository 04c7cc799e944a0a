use diesel::prelude::*;

use product_catalog::domain::types::{ImageUrl, ProductId};
use product_catalog::forms::products::ProductForm;
use product_catalog::repository::{
    DieselRepository, ProductImageReader, ProductImageWriter, ProductReader,
};
use product_catalog::schema::{categories, product_images};
use product_catalog::services::products::{
    SubmissionOutcome, create_product, delete_product, show_products, toggle_featured,
    update_product,
};

mod common;

fn seed_category(test_db: &common::TestDb, name: &str) {
    let mut conn = test_db
        .pool()
        .get()
        .expect("should acquire DB connection for setup");
    diesel::insert_into(categories::table)
        .values(categories::name.eq(name))
        .execute(&mut conn)
        .expect("should create category");
}

fn widget_form() -> ProductForm {
    ProductForm {
        name: "Widget".to_string(),
        sku: "AB123456".to_string(),
        price: "19.99".to_string(),
        category: "Tools".to_string(),
        ..ProductForm::default()
    }
}

#[test]
fn create_then_list_returns_product_with_submitted_images() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_category(&test_db, "Tools");

    let form = ProductForm {
        description: "A fine widget".to_string(),
        image_1: "https://example.com/a.jpg".to_string(),
        image_3: "https://example.com/c.jpg".to_string(),
        ..widget_form()
    };
    assert_eq!(
        create_product(form, &repo).expect("create should succeed"),
        SubmissionOutcome::Saved
    );

    let (products, featured) = show_products(&repo).expect("list should succeed");
    assert_eq!(products.len(), 1);
    assert!(featured.is_empty());

    let product = &products[0];
    assert_eq!(product.name, "Widget");
    assert_eq!(product.sku, "AB123456");
    assert_eq!(product.price, 19.99);
    assert_eq!(product.category, "Tools");
    assert!(!product.featured);
    assert_eq!(
        product.images,
        vec![
            ImageUrl::new("https://example.com/a.jpg").unwrap(),
            ImageUrl::new("https://example.com/c.jpg").unwrap(),
        ]
    );
}

#[test]
fn edit_reconciles_images_without_recreating_retained_rows() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_category(&test_db, "Tools");

    let form = ProductForm {
        image_1: "https://example.com/a.jpg".to_string(),
        image_2: "https://example.com/b.jpg".to_string(),
        ..widget_form()
    };
    create_product(form, &repo).expect("create should succeed");

    let product_id = show_products(&repo).expect("list should succeed").0[0].id;
    let images_before = repo
        .list_images_for_product(product_id)
        .expect("should list images");
    let retained_row = images_before
        .iter()
        .find(|image| image.url == "https://example.com/b.jpg")
        .expect("image B should exist")
        .id;

    // {A, B} -> {B, C}
    let form = ProductForm {
        image_1: "https://example.com/b.jpg".to_string(),
        image_2: "https://example.com/c.jpg".to_string(),
        ..widget_form()
    };
    assert_eq!(
        update_product(product_id, form, &repo).expect("edit should succeed"),
        SubmissionOutcome::Saved
    );

    let images_after = repo
        .list_images_for_product(product_id)
        .expect("should list images");
    let urls: Vec<&str> = images_after.iter().map(|image| image.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://example.com/b.jpg", "https://example.com/c.jpg"]
    );

    let retained_after = images_after
        .iter()
        .find(|image| image.url == "https://example.com/b.jpg")
        .expect("image B should survive the edit")
        .id;
    assert_eq!(retained_after, retained_row);
}

#[test]
fn edit_applies_fields_and_category_change() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_category(&test_db, "Tools");
    seed_category(&test_db, "Garden");

    create_product(widget_form(), &repo).expect("create should succeed");
    let product_id = show_products(&repo).expect("list should succeed").0[0].id;

    let form = ProductForm {
        name: "Sprinkler".to_string(),
        sku: "ZZ999999".to_string(),
        price: "42".to_string(),
        category: "Garden".to_string(),
        description: "Waters the lawn".to_string(),
        ..ProductForm::default()
    };
    update_product(product_id, form, &repo).expect("edit should succeed");

    let product = repo
        .get_product_by_id(product_id)
        .expect("get should succeed")
        .expect("product should exist");
    assert_eq!(product.name, "Sprinkler");
    assert_eq!(product.sku, "ZZ999999");
    assert_eq!(product.price, 42.0);
    assert_eq!(product.category, "Garden");
    assert_eq!(product.description.unwrap().as_str(), "Waters the lawn");
}

#[test]
fn delete_product_removes_its_images() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_category(&test_db, "Tools");

    let form = ProductForm {
        image_1: "https://example.com/a.jpg".to_string(),
        ..widget_form()
    };
    create_product(form, &repo).expect("create should succeed");
    let product_id = show_products(&repo).expect("list should succeed").0[0].id;

    delete_product(product_id, &repo).expect("delete should succeed");

    assert!(
        repo.get_product_by_id(product_id)
            .expect("get should succeed")
            .is_none()
    );

    let mut conn = test_db.pool().get().expect("should acquire DB connection");
    let remaining: i64 = product_images::table
        .count()
        .get_result(&mut conn)
        .expect("count should succeed");
    assert_eq!(remaining, 0);
}

#[test]
fn toggle_featured_persists_across_loads() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_category(&test_db, "Tools");

    create_product(widget_form(), &repo).expect("create should succeed");
    let product_id = show_products(&repo).expect("list should succeed").0[0].id;

    toggle_featured(product_id, &repo).expect("toggle should succeed");
    let product = repo
        .get_product_by_id(product_id)
        .expect("get should succeed")
        .expect("product should exist");
    assert!(product.featured);

    toggle_featured(product_id, &repo).expect("toggle should succeed");
    let product = repo
        .get_product_by_id(product_id)
        .expect("get should succeed")
        .expect("product should exist");
    assert!(!product.featured);
}

#[test]
fn deleting_images_by_url_is_unscoped_across_products() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed_category(&test_db, "Tools");

    let shared = "https://example.com/shared.jpg";
    for name in ["Widget", "Gadget"] {
        let form = ProductForm {
            name: name.to_string(),
            image_1: shared.to_string(),
            ..widget_form()
        };
        create_product(form, &repo).expect("create should succeed");
    }

    let affected = repo
        .delete_images_by_url(&[ImageUrl::new(shared).unwrap()])
        .expect("delete should succeed");

    // Both products lose the image: deletion is keyed by URL value alone.
    assert_eq!(affected, 2);
    let (products, _) = show_products(&repo).expect("list should succeed");
    assert!(products.iter().all(|product| product.images.is_empty()));
}

#[test]
fn missing_ids_resolve_to_nothing() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let missing = ProductId::new(42).unwrap();
    assert!(
        repo.get_product_by_id(missing)
            .expect("get should succeed")
            .is_none()
    );
    assert!(
        repo.list_images_for_product(missing)
            .expect("list should succeed")
            .is_empty()
    );
}
