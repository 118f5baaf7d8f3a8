use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::{error, info};
use serde_json::json;
use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Datos no válidos: {0}")]
    Validation(FieldErrors),

    #[error("Producto {0} no encontrado")]
    NotFound(i64),

    #[error("Error de base de datos: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Error en las migraciones: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Error de configuración: {0}")]
    Config(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Sqlx(_) | AppError::Migrate(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(errors) => {
                info!("Petición rechazada por validación: {}", errors);
                HttpResponse::UnprocessableEntity().json(json!({
                    "error": "Los datos enviados no son válidos",
                    "errors": errors,
                }))
            }
            AppError::NotFound(_) => {
                info!("{}", self);
                HttpResponse::NotFound().json(json!({ "error": self.to_string() }))
            }
            AppError::Sqlx(e) => {
                error!("Error de base de datos: {:?}", e);
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "Error al acceder a la base de datos" }))
            }
            AppError::Migrate(_) | AppError::Config(_) => {
                error!("{:?}", self);
                HttpResponse::InternalServerError().json(json!({ "error": "Error interno" }))
            }
        }
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
