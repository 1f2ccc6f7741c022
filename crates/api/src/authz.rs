//! Request-side permission guard.
//!
//! Enforced in the handler before any product operation runs, so the product
//! service itself stays auth-agnostic.

use stockroom_auth::{AuthzError, Permission, authorize};

use crate::context::PrincipalContext;

/// Check that the request's principal holds `required`.
pub fn authorize_request(principal: &PrincipalContext, required: &Permission) -> Result<(), AuthzError> {
    let result = authorize(&principal.principal(), required);
    if let Err(e) = &result {
        tracing::info!(principal_id = %principal.principal_id(), error = %e, "request denied");
    }
    result
}
