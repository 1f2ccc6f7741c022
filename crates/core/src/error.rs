//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Storage and
/// transport concerns belong elsewhere. Form validation failures are reported
/// by the products crate together with the rejected input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The referenced record does not exist.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn not_found() -> Self {
        Self::NotFound
    }
}
