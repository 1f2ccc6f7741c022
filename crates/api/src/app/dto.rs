use chrono::SecondsFormat;
use serde_json::{Value, json};

use stockroom_products::{Product, ProductForm};

/// JSON shape of a persisted product.
pub fn product_to_json(p: &Product) -> Value {
    json!({
        "id": p.id.get(),
        "name": p.name,
        "description": p.description,
        "price": format!("{:.2}", p.price),
        "quantity": p.quantity,
        "created_at": p.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        "updated_at": p.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}

/// Form prefilled from a persisted product (edit view).
pub fn product_form(p: &Product) -> ProductForm {
    ProductForm::new(
        p.name.clone(),
        p.description.clone(),
        format!("{:.2}", p.price),
        p.quantity.to_string(),
    )
}

/// Empty entry form (create view).
pub fn empty_form() -> ProductForm {
    ProductForm::new("", "", "", "")
}
