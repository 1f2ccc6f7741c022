use axum::{Router, routing::get};

pub mod common;
pub mod products;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/products/", get(products::list_products))
        .route(
            "/products/create/",
            get(products::create_form).post(products::create_product),
        )
        .route(
            "/products/edit/:id/",
            get(products::edit_form).post(products::update_product),
        )
        .route(
            "/products/delete/:id/",
            get(products::confirm_delete).post(products::delete_product),
        )
}
