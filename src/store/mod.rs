//! Persistence of products behind a trait, so handlers receive a store
//! built once at startup instead of reaching for a global connection.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{NewProduct, Product};

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

/// Computes the new field set from the stored record during an update.
/// Returning an error aborts the update without writing anything.
pub type ApplyChanges<'a> = &'a (dyn Fn(&Product) -> Result<NewProduct> + Send + Sync);

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products ordered by id.
    async fn list(&self) -> Result<Vec<Product>>;

    async fn get(&self, id: i64) -> Result<Product>;

    async fn create(&self, product: NewProduct) -> Result<Product>;

    /// Reads, transforms and writes the record as one atomic step. `id` and
    /// `created_at` are kept, `updated_at` moves forward.
    async fn update(&self, id: i64, apply: ApplyChanges<'_>) -> Result<Product>;

    async fn delete(&self, id: i64) -> Result<()>;

    /// Fails when the backing storage cannot be reached.
    async fn ping(&self) -> Result<()>;
}
