//! Product persistence abstractions.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockroom_products::{Product, ProductFields, ProductId};

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

/// Persistence failure (infrastructure, never a domain outcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend rejected or failed a statement.
    #[error("database error: {0}")]
    Database(String),

    /// The backend could not be reached (closed pool, poisoned lock, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent product storage.
///
/// Every call is a single atomic step against the backend. Implementations:
/// - assign ids in ascending order, starting at 1
/// - set `created_at` and `updated_at` on insert
/// - leave `id`/`created_at` untouched on update and move `updated_at` forward
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products ordered by ascending id.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Insert a new record and return it with its assigned id and timestamps.
    async fn insert(&self, fields: ProductFields) -> Result<Product, StoreError>;

    /// Overwrite the editable attributes of an existing record.
    ///
    /// Returns `None` if no record has this id.
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Option<Product>, StoreError>;

    /// Permanently remove a record. Returns whether a record was removed.
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list().await
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get(id).await
    }

    async fn insert(&self, fields: ProductFields) -> Result<Product, StoreError> {
        (**self).insert(fields).await
    }

    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Option<Product>, StoreError> {
        (**self).update(id, fields).await
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        (**self).delete(id).await
    }
}
