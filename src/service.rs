use std::sync::Arc;

use log::{info, warn};

use crate::errors::{AppError, Result};
use crate::models::{Product, ProductPayload};
use crate::sample::sample_catalog;
use crate::store::ProductStore;
use crate::validation::ValidationRules;

/// Validation plus persistence of products; what the HTTP handlers talk to.
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    rules: ValidationRules,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>, rules: ValidationRules) -> Self {
        ProductService { store, rules }
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        self.store.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Product> {
        self.store.get(id).await
    }

    pub async fn create(&self, payload: &ProductPayload) -> Result<Product> {
        let product = self.rules.validate(payload).map_err(AppError::Validation)?;
        let created = self.store.create(product).await?;
        info!("Producto creado: {}", created.id);
        Ok(created)
    }

    /// Fields missing from `payload` keep their stored value; the merged
    /// record goes through the same rules as a create.
    pub async fn update(&self, id: i64, payload: &ProductPayload) -> Result<Product> {
        let rules = &self.rules;
        let apply = |current: &Product| {
            rules
                .validate(&payload.merged_with(current))
                .map_err(AppError::Validation)
        };
        let updated = self.store.update(id, &apply).await?;
        info!("Producto actualizado: {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(id).await?;
        info!("Producto eliminado: {}", id);
        Ok(())
    }

    pub async fn database_reachable(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("La base de datos no responde: {}", e);
                false
            }
        }
    }

    /// Inserts the sample catalog when the store holds no products.
    /// Returns how many products were inserted.
    pub async fn seed_if_empty(&self) -> Result<usize> {
        if !self.store.list().await?.is_empty() {
            info!("El catálogo ya tiene productos, no se insertan datos de ejemplo");
            return Ok(0);
        }
        let catalog = sample_catalog();
        let count = catalog.len();
        for product in catalog {
            self.store.create(product).await?;
        }
        info!("Insertados {} productos de ejemplo", count);
        Ok(count)
    }
}
