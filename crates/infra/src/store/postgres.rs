//! Postgres-backed product store.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database (any SQLSTATE) | `Database` |
//! | PoolClosed / PoolTimedOut / Io / Tls | `Unavailable` |
//! | Other | `Database` |
//!
//! Ids come from a `BIGSERIAL` sequence, so they ascend and are never reused.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use stockroom_products::{Product, ProductFields, ProductId};

use super::{ProductStore, StoreError};

/// Table definition, applied by [`PostgresProductStore::ensure_schema`].
pub const SCHEMA: &str = include_str!("../../migrations/0001_create_products.sql");

/// Postgres-backed product store.
///
/// Uses the SQLx connection pool, which is `Send + Sync`; each method issues a
/// single statement, so every call is atomic on its own.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: Arc<PgPool>,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `products` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price, quantity, created_at, updated_at
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price, quantity, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get", e))?;

        row.as_ref().map(product_from_row).transpose()
    }

    #[instrument(skip(self, fields), err)]
    async fn insert(&self, fields: ProductFields) -> Result<Product, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, quantity, created_at, updated_at
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.quantity)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        product_from_row(&row)
    }

    #[instrument(skip(self, fields), fields(product_id = %id), err)]
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            r#"
            UPDATE products
            SET name = $2,
                description = $3,
                price = $4,
                quantity = $5,
                updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            RETURNING id, name, description, price, quantity, created_at, updated_at
            "#,
        )
        .bind(id.get())
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.quantity)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        row.as_ref().map(product_from_row).transpose()
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::Database(match db_err.code() {
            Some(code) => format!("{operation}: {} (SQLSTATE {code})", db_err.message()),
            None => format!("{operation}: {}", db_err.message()),
        }),
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool timed out in {operation}"))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {operation}: {e}")),
        sqlx::Error::Tls(e) => StoreError::Unavailable(format!("tls error in {operation}: {e}")),
        other => StoreError::Database(format!("sqlx error in {operation}: {other}")),
    }
}

// SQLx row types

#[derive(Debug)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: Decimal,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, sqlx::postgres::PgRow> for ProductRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            quantity: row.try_get("quantity")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn product_from_row(row: &sqlx::postgres::PgRow) -> Result<Product, StoreError> {
    ProductRow::from_row(row)
        .map(Product::from)
        .map_err(|e| StoreError::Database(format!("failed to decode product row: {e}")))
}
