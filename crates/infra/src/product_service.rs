//! Product record service (application-level orchestration).
//!
//! Composes pure validation from `stockroom-products` with a [`ProductStore`]:
//!
//! ```text
//! raw form ──validate_and_build──> ProductFields ──store──> Product
//!              │
//!              └─ Rejected (messages + echoed input), nothing written
//! ```
//!
//! The service assumes the caller is already authorized and holds no state of
//! its own between calls.

use thiserror::Error;
use tracing::{info, instrument, warn};

use stockroom_core::DomainError;
use stockroom_products::{Product, ProductForm, ProductId, Rejected, validate_and_build};

use crate::store::{ProductStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Domain outcome (e.g. the referenced product does not exist).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Submitted form failed validation; nothing was written.
    ///
    /// For edits, `existing` holds the record as currently persisted.
    #[error("validation failed: {rejected}")]
    Invalid {
        rejected: Rejected,
        existing: Option<Box<Product>>,
    },

    /// Persisting or loading failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn not_found() -> Self {
        Self::Domain(DomainError::not_found())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(DomainError::NotFound))
    }
}

/// Validates product forms and performs create/update/delete against a store.
#[derive(Debug, Clone)]
pub struct ProductService<S> {
    store: S,
}

impl<S> ProductService<S>
where
    S: ProductStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All products in insertion (ascending id) order.
    #[instrument(skip(self), err)]
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.store.list().await?)
    }

    /// Load one product, for the edit form or the delete confirmation.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.store.get(id).await?.ok_or_else(ServiceError::not_found)
    }

    #[instrument(skip(self, form))]
    pub async fn create(&self, form: &ProductForm) -> Result<Product, ServiceError> {
        let fields = validate_and_build(form).map_err(|rejected| {
            warn!(errors = ?rejected.messages(), "product form rejected");
            ServiceError::Invalid {
                rejected,
                existing: None,
            }
        })?;

        let product = self.store.insert(fields).await?;
        info!(product_id = %product.id, "product created");
        Ok(product)
    }

    /// Validate and apply an edit to an existing product.
    ///
    /// The record is loaded first: an unknown id is `NotFound` even if the
    /// form is also invalid.
    #[instrument(skip(self, form), fields(product_id = %id))]
    pub async fn update(&self, id: ProductId, form: &ProductForm) -> Result<Product, ServiceError> {
        let existing = self.fetch(id).await?;

        let fields = match validate_and_build(form) {
            Ok(fields) => fields,
            Err(rejected) => {
                warn!(errors = ?rejected.messages(), "product edit rejected");
                return Err(ServiceError::Invalid {
                    rejected,
                    existing: Some(Box::new(existing)),
                });
            }
        };

        // The record may have been deleted since it was loaded.
        let product = self
            .store
            .update(id, fields)
            .await?
            .ok_or_else(ServiceError::not_found)?;
        info!("product updated");
        Ok(product)
    }

    /// Permanently delete a product (the confirmed step of a delete).
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::not_found());
        }
        info!("product deleted");
        Ok(())
    }
}
