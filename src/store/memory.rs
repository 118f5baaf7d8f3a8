use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ApplyChanges, ProductStore};
use crate::errors::{AppError, Result};
use crate::models::{next_timestamp, timestamp_now, NewProduct, Product};

#[derive(Default)]
struct Inner {
    last_id: i64,
    products: BTreeMap<i64, Product>,
}

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryProductStore {
    inner: Mutex<Inner>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>> {
        let inner = self.inner.lock().await;
        Ok(inner.products.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Product> {
        let inner = self.inner.lock().await;
        inner.products.get(&id).cloned().ok_or(AppError::NotFound(id))
    }

    async fn create(&self, product: NewProduct) -> Result<Product> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let now = timestamp_now();
        let created = Product {
            id: inner.last_id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            category: product.category,
            created_at: now,
            updated_at: now,
        };
        inner.products.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, apply: ApplyChanges<'_>) -> Result<Product> {
        let mut inner = self.inner.lock().await;
        let current = inner.products.get_mut(&id).ok_or(AppError::NotFound(id))?;
        let changes = apply(&*current)?;

        current.name = changes.name;
        current.description = changes.description;
        current.price = changes.price;
        current.quantity = changes.quantity;
        current.category = changes.category;
        current.updated_at = next_timestamp(current.updated_at);
        Ok(current.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound(id))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn book(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: String::new(),
            price: dec!(49.99),
            quantity: 50,
            category: "Livros".to_string(),
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryProductStore::new();
        let first = store.create(book("A")).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(book("B")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(matches!(store.get(1).await, Err(AppError::NotFound(1))));
    }

    #[tokio::test]
    async fn failed_apply_leaves_record_untouched() {
        let store = MemoryProductStore::new();
        let created = store.create(book("A")).await.unwrap();
        let result = store
            .update(created.id, &|_| Err(AppError::Config("no".to_string())))
            .await;
        assert!(result.is_err());
        assert_eq!(store.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let store = MemoryProductStore::new();
        for name in ["C", "A", "B"] {
            store.create(book(name)).await.unwrap();
        }
        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
