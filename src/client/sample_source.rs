use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{ClientError, DataSource};
use crate::models::Product;
use crate::sample::sample_catalog;

// 2024-01-01T00:00:00Z
const SAMPLE_TIMESTAMP: i64 = 1_704_067_200;

/// The sample catalog with ids 1..=10 and fixed timestamps. Read only.
pub struct StaticSampleSource {
    products: Vec<Product>,
}

impl Default for StaticSampleSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticSampleSource {
    pub fn new() -> Self {
        let at = DateTime::<Utc>::from_timestamp(SAMPLE_TIMESTAMP, 0).unwrap_or_default();
        let products = sample_catalog()
            .into_iter()
            .zip(1..)
            .map(|(product, id)| Product {
                id,
                name: product.name,
                description: product.description,
                price: product.price,
                quantity: product.quantity,
                category: product.category,
                created_at: at,
                updated_at: at,
            })
            .collect();
        StaticSampleSource { products }
    }
}

#[async_trait]
impl DataSource for StaticSampleSource {
    async fn list(&self) -> Result<Vec<Product>, ClientError> {
        Ok(self.products.clone())
    }

    async fn get(&self, id: i64) -> Result<Product, ClientError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ClientError::NotFound(id))
    }
}
