use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use log::info;
use serde_json::json;

use crate::errors::{AppError, Result};
use crate::models::ProductPayload;
use crate::service::ProductService;
use crate::validation::FieldErrors;

const SERVICE_NAME: &str = "product-catalog";

async fn api_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "app": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /api/health",
            "GET /api/products",
            "POST /api/products",
            "GET /api/products/{id}",
            "PUT /api/products/{id}",
            "DELETE /api/products/{id}",
        ]
    }))
}

#[get("/health")]
async fn health(service: web::Data<ProductService>) -> HttpResponse {
    let database = if service.database_reachable().await {
        "connected"
    } else {
        "disconnected"
    };

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "database": database,
        "endpoints": {
            "products": "/api/products",
            "health": "/api/health",
        }
    }))
}

#[get("/products")]
async fn list_products(service: web::Data<ProductService>) -> Result<HttpResponse> {
    info!("Recibida petición GET /products");
    let products = service.list().await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/products/{id}")]
async fn get_product(service: web::Data<ProductService>, id: web::Path<i64>) -> Result<HttpResponse> {
    info!("Recibida petición GET /products/{}", id);
    let product = service.get(*id).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[post("/products")]
async fn create_product(
    service: web::Data<ProductService>,
    payload: web::Json<ProductPayload>,
) -> Result<HttpResponse> {
    info!("Recibida petición POST /products: {:?}", payload);
    let product = service.create(&payload).await?;
    Ok(HttpResponse::Created().json(product))
}

#[put("/products/{id}")]
async fn update_product(
    service: web::Data<ProductService>,
    id: web::Path<i64>,
    payload: web::Json<ProductPayload>,
) -> Result<HttpResponse> {
    info!("Recibida petición PUT /products/{}: {:?}", id, payload);
    let product = service.update(*id, &payload).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[delete("/products/{id}")]
async fn delete_product(service: web::Data<ProductService>, id: web::Path<i64>) -> Result<HttpResponse> {
    info!("Recibida petición DELETE /products/{}", id);
    service.delete(*id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Producto eliminado",
        "id": *id,
    })))
}

/// Unreadable or mistyped bodies are answered like any other invalid input.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let mut errors = FieldErrors::new();
        errors.add("body", err.to_string());
        AppError::Validation(errors).into()
    })
}

/// Registers the `/api` scope. Expects a `web::Data<ProductService>` in the
/// app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .route("", web::get().to(api_info))
            .service(health)
            .service(list_products)
            .service(get_product)
            .service(create_product)
            .service(update_product)
            .service(delete_product),
    );
}
