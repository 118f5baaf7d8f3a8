//! Consumer side of the product API: data sources, the sample-data
//! fallback policy and the state behind each client view.

mod fallback;
mod remote;
mod sample_source;
pub mod views;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Product;
use crate::validation::FieldErrors;

pub use fallback::{FallbackSource, Origin, Sourced};
pub use remote::RemoteSource;
pub use sample_source::StaticSampleSource;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("No se pudo conectar con la API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Producto {0} no encontrado")]
    NotFound(i64),

    #[error("Errores de validación: {0}")]
    Validation(FieldErrors),

    #[error("Error de la API ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Respuesta no válida de la API: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

/// Read access to products, whatever their origin.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ClientError>;

    async fn get(&self, id: i64) -> Result<Product, ClientError>;
}
