#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::{HttpListingRepository, ListingReader};
#[cfg(feature = "server")]
use crate::routes::api::api_v1_listing;
#[cfg(feature = "server")]
use crate::routes::listing::{show_index, show_listing};

pub mod domain;
pub mod dto;
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod services;

/// Registers the listing pages and the JSON API.
///
/// Handlers expect `web::Data<dyn ListingReader>`, `web::Data<ListingDefaults>`
/// and `web::Data<Tera>` to be registered on the app.
///
/// [`ListingDefaults`]: crate::services::storefront::ListingDefaults
#[cfg(feature = "server")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").wrap(Cors::permissive()).service(api_v1_listing))
        .service(show_index)
        .service(show_listing);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = HttpListingRepository::new(
        &server_config.api_base_url,
        server_config.request_timeout(),
    )
    .map_err(|e| std::io::Error::other(format!("Invalid listing API url: {e}")))?;
    let reader: Arc<dyn ListingReader> = Arc::new(repo);
    let reader = web::Data::from(reader);

    let defaults = web::Data::new(server_config.listing_defaults());

    // Flash messages survive the redirect after rejected filters.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;
    let tera = web::Data::new(tera);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving listings from {} on {}:{}",
        server_config.api_base_url,
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure)
            .app_data(reader.clone())
            .app_data(defaults.clone())
            .app_data(tera.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
