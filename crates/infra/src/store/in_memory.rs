use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use stockroom_products::{Product, ProductFields, ProductId};

use super::{ProductStore, StoreError};

#[derive(Debug)]
struct Table {
    last_id: i64,
    rows: BTreeMap<ProductId, Product>,
}

/// In-memory product store.
///
/// Intended for tests/dev. Ids are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryProductStore {
    table: RwLock<Table>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                last_id: 0,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, fields: ProductFields) -> Result<Product, StoreError> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        table.last_id += 1;
        let id = ProductId::new(table.last_id);

        let product = Product::created(id, fields, Utc::now());
        table.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Option<Product>, StoreError> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        Ok(table.rows.get_mut(&id).map(|product| {
            product.revise(fields, Utc::now());
            product.clone()
        }))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        Ok(table.rows.remove(&id).is_some())
    }
}
