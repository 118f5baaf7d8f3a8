use async_trait::async_trait;
use log::{debug, info};
use sqlx::PgPool;

use super::{ApplyChanges, ProductStore};
use crate::errors::{AppError, Result};
use crate::models::{next_timestamp, timestamp_now, NewProduct, Product};

pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        PgProductStore { pool }
    }

    pub async fn connect(connection_string: &str) -> Result<Self> {
        let pool = PgPool::connect(connection_string).await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!().run(&self.pool).await?;
        info!("Migraciones aplicadas");
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn get(&self, id: i64) -> Result<Product> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(id))
    }

    async fn create(&self, product: NewProduct) -> Result<Product> {
        let now = timestamp_now();
        let created = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, description, price, quantity, category, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) RETURNING *",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(&product.category)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        debug!("Producto insertado: {}", created.id);
        Ok(created)
    }

    async fn update(&self, id: i64, apply: ApplyChanges<'_>) -> Result<Product> {
        let mut tx = self.pool.begin().await?;

        let current =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(AppError::NotFound(id))?;

        let changes = apply(&current)?;

        let updated = sqlx::query_as::<_, Product>(
            "UPDATE products SET name=$1, description=$2, price=$3, quantity=$4, category=$5, updated_at=$6 \
             WHERE id=$7 RETURNING *",
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.price)
        .bind(changes.quantity)
        .bind(&changes.category)
        .bind(next_timestamp(current.updated_at))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            Ok(())
        } else {
            Err(AppError::NotFound(id))
        }
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
