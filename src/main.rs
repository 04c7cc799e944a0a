use actix_web::cookie::Key;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use product_catalog::db::establish_connection_pool;
use product_catalog::models::config::ServerConfig;
use product_catalog::repository::DieselRepository;
use product_catalog::routes::products::{
    create_product, delete_product, show_create_form, show_delete_confirmation, show_edit_form,
    show_products, toggle_featured, update_product,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let settings = match config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default())
        .build()
        .and_then(|settings| settings.try_deserialize::<ServerConfig>())
    {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&settings.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection pool: {e}");
            std::process::exit(1);
        }
    };

    let tera = match Tera::new("templates/**/*.html") {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to load templates: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = match settings.secret_key.as_deref() {
        Some(secret) if secret.len() >= 64 => Key::from(secret.as_bytes()),
        Some(_) => {
            log::warn!("secret_key is shorter than 64 bytes; generating a random key");
            Key::generate()
        }
        None => Key::generate(),
    };
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let repo = DieselRepository::new(pool);
    let bind_address = settings.bind_address.clone();

    log::info!("Starting catalog server on {bind_address}");

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
            .service(show_products)
            .service(show_create_form)
            .service(create_product)
            .service(show_edit_form)
            .service(update_product)
            .service(show_delete_confirmation)
            .service(delete_product)
            .service(toggle_featured)
    })
    .bind(&bind_address)?
    .run()
    .await
}
