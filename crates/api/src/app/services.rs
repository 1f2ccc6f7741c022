use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use stockroom_infra::{InMemoryProductStore, PostgresProductStore, ProductService, ProductStore};

use crate::config::StoreConfig;

/// Product service over a type-erased store, so both backends share handlers.
pub type DynProductService = ProductService<Arc<dyn ProductStore>>;

#[derive(Clone)]
pub struct AppServices {
    products: DynProductService,
    backend: &'static str,
}

impl AppServices {
    pub fn new(store: Arc<dyn ProductStore>, backend: &'static str) -> Self {
        Self {
            products: ProductService::new(store),
            backend,
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductStore::new()), "in-memory")
    }

    pub fn products(&self) -> &DynProductService {
        &self.products
    }

    pub fn backend(&self) -> &'static str {
        self.backend
    }
}

pub async fn build_services(store: &StoreConfig) -> anyhow::Result<AppServices> {
    match store {
        StoreConfig::InMemory => Ok(AppServices::in_memory()),
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await
                .context("failed to connect to DATABASE_URL")?;

            let store = PostgresProductStore::new(pool);
            store
                .ensure_schema()
                .await
                .context("failed to create products table")?;

            Ok(AppServices::new(Arc::new(store), "postgres"))
        }
    }
}
