//! Infrastructure layer: product persistence and the product record service.

pub mod product_service;
pub mod store;

pub use product_service::{ProductService, ServiceError};
pub use store::{InMemoryProductStore, PostgresProductStore, ProductStore, StoreError};
