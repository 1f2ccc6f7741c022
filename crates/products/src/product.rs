use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::Entity;

/// Product identifier, assigned by the store on creation (ascending from 1).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl core::str::FromStr for ProductId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

/// Validated, typed product attributes ready for persistence.
///
/// Only `validation::validate_and_build` produces these from user input, so a
/// value of this type always satisfies the product invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// A persisted product record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a freshly created record; both timestamps start at `created_at`.
    pub fn created(id: ProductId, fields: ProductFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            quantity: fields.quantity,
            created_at,
            updated_at: created_at,
        }
    }

    /// Overwrite the editable attributes in place.
    ///
    /// `id` and `created_at` never change. `updated_at` only moves forward: a
    /// clock reading at or before the current value is bumped by one microsecond
    /// (the finest resolution SQL timestamps keep).
    pub fn revise(&mut self, fields: ProductFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.quantity = fields.quantity;
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + chrono::Duration::microseconds(1)
        };
    }

    /// The editable attributes of this record.
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity: self.quantity,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn widget() -> ProductFields {
        ProductFields {
            name: "Widget".to_string(),
            description: String::new(),
            price: Decimal::new(1990, 2),
            quantity: 10,
        }
    }

    #[test]
    fn created_record_starts_with_equal_timestamps() {
        let product = Product::created(ProductId::new(1), widget(), test_time());
        assert_eq!(product.created_at, product.updated_at);
        assert_eq!(product.fields(), widget());
        assert_eq!(product.to_string(), "Widget");
    }

    #[test]
    fn revise_preserves_identity_and_creation_time() {
        let mut product = Product::created(ProductId::new(7), widget(), test_time());
        let later = test_time() + chrono::Duration::seconds(30);

        product.revise(
            ProductFields {
                name: "Gadget".to_string(),
                description: "blue".to_string(),
                price: Decimal::ZERO,
                quantity: 3,
            },
            later,
        );

        assert_eq!(product.id(), ProductId::new(7));
        assert_eq!(product.created_at, test_time());
        assert_eq!(product.updated_at, later);
        assert_eq!(product.name, "Gadget");
        assert_eq!(product.quantity, 3);
    }

    #[test]
    fn revise_never_moves_updated_at_backwards() {
        let mut product = Product::created(ProductId::new(1), widget(), test_time());

        product.revise(widget(), test_time());
        assert!(product.updated_at > test_time());

        let previous = product.updated_at;
        product.revise(widget(), test_time() - chrono::Duration::hours(1));
        assert!(product.updated_at > previous);
    }

    #[test]
    fn same_identity_ignores_attributes() {
        let a = Product::created(ProductId::new(3), widget(), test_time());
        let mut b = a.clone();
        b.revise(
            ProductFields {
                name: "Other".to_string(),
                ..widget()
            },
            test_time() + chrono::Duration::seconds(1),
        );
        assert!(a.same_identity_as(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn product_id_parses_from_path_segment() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::new(42));
        assert!("abc".parse::<ProductId>().is_err());
        assert_eq!(ProductId::new(5).to_string(), "5");
    }
}
