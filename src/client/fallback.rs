use log::warn;

use super::{ClientError, DataSource, RemoteSource, StaticSampleSource};
use crate::models::Product;

pub const FALLBACK_WARNING: &str =
    "No se pudo conectar con la API. Mostrando datos de ejemplo.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Remote,
    Sample,
}

/// Data tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub data: T,
    pub origin: Origin,
    /// Connectivity warning to show next to sample data.
    pub warning: Option<String>,
}

impl<T> Sourced<T> {
    fn remote(data: T) -> Self {
        Sourced {
            data,
            origin: Origin::Remote,
            warning: None,
        }
    }

    fn sample(data: T, cause: &ClientError) -> Self {
        Sourced {
            data,
            origin: Origin::Sample,
            warning: Some(format!("{} ({})", FALLBACK_WARNING, cause)),
        }
    }
}

/// Reads from the primary source and switches to the fallback only when the
/// primary could not be reached at all. Not-found, validation and server
/// errors are returned as they are.
pub struct FallbackSource {
    primary: Box<dyn DataSource>,
    fallback: Box<dyn DataSource>,
    enabled: bool,
}

impl FallbackSource {
    pub fn new(primary: impl DataSource + 'static, fallback: impl DataSource + 'static) -> Self {
        FallbackSource {
            primary: Box::new(primary),
            fallback: Box::new(fallback),
            enabled: true,
        }
    }

    /// Remote API first, sample catalog when it is unreachable.
    pub fn with_samples(remote: RemoteSource) -> Self {
        Self::new(remote, StaticSampleSource::new())
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub async fn list(&self) -> Result<Sourced<Vec<Product>>, ClientError> {
        match self.primary.list().await {
            Ok(products) => Ok(Sourced::remote(products)),
            Err(err) if self.enabled && err.is_transport() => {
                warn!("API no disponible, usando datos de ejemplo: {}", err);
                let products = self.fallback.list().await?;
                Ok(Sourced::sample(products, &err))
            }
            Err(err) => Err(err),
        }
    }

    pub async fn get(&self, id: i64) -> Result<Sourced<Product>, ClientError> {
        match self.primary.get(id).await {
            Ok(product) => Ok(Sourced::remote(product)),
            Err(err) if self.enabled && err.is_transport() => {
                warn!("API no disponible, usando datos de ejemplo para {}: {}", id, err);
                let product = self.fallback.get(id).await?;
                Ok(Sourced::sample(product, &err))
            }
            Err(err) => Err(err),
        }
    }
}
