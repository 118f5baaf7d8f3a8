use std::sync::Arc;

use actix_cors::Cors;
use actix_web::web;
use log::info;
use product_catalog::config::AppConfig;
use product_catalog::handlers;
use product_catalog::service::ProductService;
use product_catalog::store::PgProductStore;
use shuttle_actix_web::ShuttleActixWeb;
use shuttle_runtime::{CustomError, SecretStore};

fn cors(allowed_origin: Option<&str>) -> Cors {
    let cors = Cors::default().allow_any_method().allow_any_header();
    match allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] connection_string: String,
    #[shuttle_runtime::Secrets] secrets: SecretStore,
) -> ShuttleActixWeb<impl FnOnce(&mut web::ServiceConfig) + Send + Clone + 'static> {
    // The shuttle runtime may already have installed a logger.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    info!("Iniciando el servidor...");

    let app_config = AppConfig::from_lookup(|key| secrets.get(key)).map_err(CustomError::new)?;

    let connection_string = if connection_string.contains('?') {
        format!("{}&sslmode=require", connection_string)
    } else {
        format!("{}?sslmode=require", connection_string)
    };

    let store = PgProductStore::connect(&connection_string)
        .await
        .map_err(CustomError::new)?;
    store.migrate().await.map_err(CustomError::new)?;

    let service = ProductService::new(Arc::new(store), app_config.validation_rules());
    if app_config.seed_on_startup {
        service.seed_if_empty().await.map_err(CustomError::new)?;
    }

    let service = web::Data::new(service);
    let allowed_origin = app_config.cors_allowed_origin;

    let config = move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(service.clone()).service(
            web::scope("")
                .wrap(cors(allowed_origin.as_deref()))
                .configure(handlers::configure),
        );
    };

    Ok(config.into())
}
