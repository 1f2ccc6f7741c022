//! Products domain module.
//!
//! This crate contains the business rules for product records, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;
pub mod validation;

pub use product::{Product, ProductFields, ProductId};
pub use validation::{
    ProductForm, Rejected, ValidationIssue, validate_and_build, DESCRIPTION_MAX_CHARS,
    NAME_MAX_CHARS,
};
