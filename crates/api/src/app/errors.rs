use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_infra::ServiceError;

/// Map service failures that are not form re-renders to JSON error responses.
pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        e if e.is_not_found() => json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        ServiceError::Domain(e) => json_error(StatusCode::UNPROCESSABLE_ENTITY, "domain_error", e.to_string()),
        ServiceError::Invalid { rejected, .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", rejected.to_string())
        }
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "product store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
