use std::sync::Arc;

use axum::{
    Form,
    extract::{Extension, Path},
    http::HeaderMap,
    response::Response,
};

use stockroom_auth::Permission;
use stockroom_infra::ServiceError;
use stockroom_products::ProductForm;

use crate::app::routes::common::{parse_product_id, require};
use crate::app::services::AppServices;
use crate::app::views::{self, Flash};
use crate::app::errors;
use crate::context::PrincipalContext;

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = require(&principal, &Permission::PRODUCTS_READ) {
        return resp;
    }

    match services.products().list().await {
        Ok(products) => views::list(&products, &headers),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_form(Extension(principal): Extension<PrincipalContext>) -> Response {
    if let Err(resp) = require(&principal, &Permission::PRODUCTS_READ) {
        return resp;
    }
    views::create_form()
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Form(form): Form<ProductForm>,
) -> Response {
    if let Err(resp) = require(&principal, &Permission::PRODUCTS_WRITE) {
        return resp;
    }

    match services.products().create(&form).await {
        Ok(_) => views::redirect_with_flash(Flash::Created),
        Err(ServiceError::Invalid { rejected, .. }) => views::create_form_rejected(&rejected),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn edit_form(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = require(&principal, &Permission::PRODUCTS_READ) {
        return resp;
    }
    let id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products().fetch(id).await {
        Ok(product) => views::edit_form(&product),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Response {
    if let Err(resp) = require(&principal, &Permission::PRODUCTS_WRITE) {
        return resp;
    }
    let id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products().update(id, &form).await {
        Ok(_) => views::redirect_with_flash(Flash::Updated),
        Err(ServiceError::Invalid {
            rejected,
            existing: Some(existing),
        }) => views::edit_form_rejected(&existing, &rejected),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn confirm_delete(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = require(&principal, &Permission::PRODUCTS_READ) {
        return resp;
    }
    let id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products().fetch(id).await {
        Ok(product) => views::delete_confirmation(&product),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = require(&principal, &Permission::PRODUCTS_WRITE) {
        return resp;
    }
    let id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products().delete(id).await {
        Ok(()) => views::redirect_with_flash(Flash::Deleted),
        Err(e) => errors::service_error_to_response(e),
    }
}
