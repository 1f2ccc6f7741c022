use axum::http::StatusCode;

use stockroom_auth::Permission;
use stockroom_products::ProductId;

use crate::app::errors;
use crate::context::PrincipalContext;

/// Parse a `:id` path segment; anything but an integer is a 400.
pub fn parse_product_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse::<ProductId>()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"))
}

/// 403 unless the principal holds `required`.
pub fn require(principal: &PrincipalContext, required: &Permission) -> Result<(), axum::response::Response> {
    crate::authz::authorize_request(principal, required)
        .map_err(|e| errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()))
}
