//! `stockroom-auth`: authentication/authorization gate primitives.
//!
//! This crate is decoupled from HTTP and storage: the transport layer extracts a
//! bearer token, asks a [`JwtValidator`] for claims, and checks permissions with
//! [`authorize`] before any product operation runs.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{authorize, AuthzError};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtError, JwtValidator};
pub use permissions::Permission;
pub use principal::{Principal, PrincipalId};
pub use roles::Role;
