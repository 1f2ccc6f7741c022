//! JSON view models for the product pages, plus flash messages.
//!
//! A successful write redirects (303) to the list page and leaves a one-shot
//! `flash` cookie holding a message code. The list view renders the message
//! and expires the cookie.

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::{Value, json};

use stockroom_products::{Product, Rejected};

use crate::app::dto;

pub const LIST_PATH: &str = "/products/";
pub const FLASH_COOKIE: &str = "flash";

const CLEAR_FLASH: &str = "flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flash {
    Created,
    Updated,
    Deleted,
}

impl Flash {
    pub fn code(self) -> &'static str {
        match self {
            Flash::Created => "created",
            Flash::Updated => "updated",
            Flash::Deleted => "deleted",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "created" => Some(Flash::Created),
            "updated" => Some(Flash::Updated),
            "deleted" => Some(Flash::Deleted),
            _ => None,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Flash::Created => "Product created.",
            Flash::Updated => "Product updated.",
            Flash::Deleted => "Product deleted.",
        }
    }

    fn set_cookie(self) -> String {
        format!("{FLASH_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.code())
    }
}

/// Raw value of the `flash` cookie, if the request carries one.
pub fn flash_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == FLASH_COOKIE)
        .map(|(_, value)| value)
}

/// 303 to the list page carrying `flash` for the next render.
pub fn redirect_with_flash(flash: Flash) -> Response {
    ([(header::SET_COOKIE, flash.set_cookie())], Redirect::to(LIST_PATH)).into_response()
}

/// List page. Consumes any pending flash message.
pub fn list(products: &[Product], headers: &HeaderMap) -> Response {
    let pending = flash_cookie(headers);
    let messages: Vec<Value> = pending
        .and_then(Flash::from_code)
        .map(|f| json!({ "level": "success", "text": f.text() }))
        .into_iter()
        .collect();

    let body = json!({
        "view": "products/list",
        "products": products.iter().map(dto::product_to_json).collect::<Vec<_>>(),
        "messages": messages,
    });

    let mut resp = Json(body).into_response();
    if pending.is_some() {
        resp.headers_mut()
            .insert(header::SET_COOKIE, HeaderValue::from_static(CLEAR_FLASH));
    }
    resp
}

pub fn create_form() -> Response {
    Json(json!({
        "view": "products/create",
        "form": dto::empty_form(),
        "errors": Vec::<String>::new(),
    }))
    .into_response()
}

/// Entry form re-rendered with the submitted values and the messages.
pub fn create_form_rejected(rejected: &Rejected) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "view": "products/create",
            "form": rejected.input,
            "errors": rejected.messages(),
        })),
    )
        .into_response()
}

pub fn edit_form(product: &Product) -> Response {
    Json(json!({
        "view": "products/edit",
        "product": dto::product_to_json(product),
        "form": dto::product_form(product),
        "errors": Vec::<String>::new(),
    }))
    .into_response()
}

/// Edit form after a rejected submission: the persisted record is untouched.
pub fn edit_form_rejected(existing: &Product, rejected: &Rejected) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "view": "products/edit",
            "product": dto::product_to_json(existing),
            "form": rejected.input,
            "errors": rejected.messages(),
        })),
    )
        .into_response()
}

pub fn delete_confirmation(product: &Product) -> Response {
    Json(json!({
        "view": "products/delete",
        "product": dto::product_to_json(product),
    }))
    .into_response()
}
