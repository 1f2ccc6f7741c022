//! Form validation for product records.
//!
//! Every field of a product form arrives as text. `validate_and_build` is the single
//! pure entry point shared by create and update: it either produces typed
//! [`ProductFields`] or a [`Rejected`] value carrying every problem found plus the
//! submitted input, so the form can be shown again as the user typed it.

use std::borrow::Cow;
use core::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::product::ProductFields;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 255;

/// Prices are stored as `NUMERIC(10, 2)`: eight integer digits at most.
const PRICE_INTEGER_DIGITS: u32 = 8;
const PRICE_SCALE: u32 = 2;

/// Raw product form as submitted by the user.
///
/// Missing fields default to an empty name/description and `"0"` for the numbers,
/// matching what an absent form control submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "zero")]
    pub price: String,
    #[serde(default = "zero")]
    pub quantity: String,
}

fn zero() -> String {
    "0".to_string()
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price: price.into(),
            quantity: quantity.into(),
        }
    }

    /// Copy of the form with surrounding whitespace stripped from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price.trim().to_string(),
            quantity: self.quantity.trim().to_string(),
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValidationIssue {
    NameRequired,
    NameTooLong,
    DescriptionTooLong,
    InvalidPrice,
    NegativePrice,
    PriceTooLarge,
    InvalidQuantity,
    NegativeQuantity,
}

impl ValidationIssue {
    /// Name of the form field the issue belongs to.
    pub fn field(self) -> &'static str {
        match self {
            Self::NameRequired | Self::NameTooLong => "name",
            Self::DescriptionTooLong => "description",
            Self::InvalidPrice | Self::NegativePrice | Self::PriceTooLarge => "price",
            Self::InvalidQuantity | Self::NegativeQuantity => "quantity",
        }
    }
}

impl core::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NameRequired => f.write_str("Name is required."),
            Self::NameTooLong => write!(f, "Name must be at most {NAME_MAX_CHARS} characters."),
            Self::DescriptionTooLong => {
                write!(f, "Description must be at most {DESCRIPTION_MAX_CHARS} characters.")
            }
            Self::InvalidPrice => f.write_str("Invalid price."),
            Self::NegativePrice => f.write_str("Price must be >= 0."),
            Self::PriceTooLarge => write!(f, "Price must be less than {}.", price_ceiling()),
            Self::InvalidQuantity => f.write_str("Invalid quantity."),
            Self::NegativeQuantity => f.write_str("Quantity must be >= 0."),
        }
    }
}

/// Validation failure: every issue found, in field order, plus the trimmed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub issues: Vec<ValidationIssue>,
    pub input: ProductForm,
}

impl Rejected {
    /// Human-readable messages in reporting order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

impl core::fmt::Display for Rejected {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

/// Validate a submitted form and build typed product fields.
///
/// All checks run; nothing short-circuits. Issues are reported in the order
/// name, description, price, quantity.
pub fn validate_and_build(form: &ProductForm) -> Result<ProductFields, Rejected> {
    let input = form.trimmed();
    let mut issues = Vec::new();

    let name_len = input.name.chars().count();
    if name_len == 0 {
        issues.push(ValidationIssue::NameRequired);
    } else if name_len > NAME_MAX_CHARS {
        issues.push(ValidationIssue::NameTooLong);
    }

    if input.description.chars().count() > DESCRIPTION_MAX_CHARS {
        issues.push(ValidationIssue::DescriptionTooLong);
    }

    let price = parse_price(&input.price).map_err(|issue| issues.push(issue)).ok();
    let quantity = parse_quantity(&input.quantity).map_err(|issue| issues.push(issue)).ok();

    match (price, quantity) {
        (Some(price), Some(quantity)) if issues.is_empty() => Ok(ProductFields {
            name: input.name,
            description: input.description,
            price,
            quantity,
        }),
        _ => Err(Rejected { issues, input }),
    }
}

fn price_ceiling() -> Decimal {
    Decimal::from(10u64.pow(PRICE_INTEGER_DIGITS))
}

/// Parse a price as a decimal, rounded half away from zero to two places.
fn parse_price(raw: &str) -> Result<Decimal, ValidationIssue> {
    let raw = strip_digit_separators(raw).ok_or(ValidationIssue::InvalidPrice)?;
    let value = match Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)) {
        Ok(value) => value,
        Err(_) => price_from_float(&raw)?,
    };

    if value < Decimal::ZERO {
        return Err(ValidationIssue::NegativePrice);
    }

    let mut price = value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if price >= price_ceiling() {
        return Err(ValidationIssue::PriceTooLarge);
    }

    // "-0" parses as a negative zero; store a plain zero.
    price.set_sign_positive(true);
    price.rescale(PRICE_SCALE);
    Ok(price)
}

/// Fallback for exponents outside the exact decimal range ("1e-30", "1e40").
fn price_from_float(raw: &str) -> Result<Decimal, ValidationIssue> {
    let value: f64 = raw.parse().map_err(|_| ValidationIssue::InvalidPrice)?;
    if !value.is_finite() {
        return Err(ValidationIssue::InvalidPrice);
    }
    if value < 0.0 {
        return Err(ValidationIssue::NegativePrice);
    }
    if value >= 10f64.powi(PRICE_INTEGER_DIGITS as i32) {
        return Err(ValidationIssue::PriceTooLarge);
    }
    // Below half a cent the price rounds to zero anyway.
    if value < 0.5 / 10f64.powi(PRICE_SCALE as i32) {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_f64(value).ok_or(ValidationIssue::InvalidPrice)
}

/// Parse a quantity as a float and truncate it toward zero, so "5.0" means 5.
fn parse_quantity(raw: &str) -> Result<i32, ValidationIssue> {
    let raw = strip_digit_separators(raw).ok_or(ValidationIssue::InvalidQuantity)?;
    let value: f64 = raw.parse().map_err(|_| ValidationIssue::InvalidQuantity)?;
    if !value.is_finite() {
        return Err(ValidationIssue::InvalidQuantity);
    }

    let whole = value.trunc();
    if whole < 0.0 {
        return Err(ValidationIssue::NegativeQuantity);
    }
    if whole > f64::from(i32::MAX) {
        return Err(ValidationIssue::InvalidQuantity);
    }

    Ok(whole as i32)
}

/// Drop digit-group underscores ("1_000"). An underscore is only allowed
/// between two digits; `None` otherwise.
fn strip_digit_separators(raw: &str) -> Option<Cow<'_, str>> {
    if !raw.contains('_') {
        return Some(Cow::Borrowed(raw));
    }

    let bytes = raw.as_bytes();
    let well_placed = bytes.iter().enumerate().filter(|(_, b)| **b == b'_').all(|(i, _)| {
        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
        let after = bytes.get(i + 1);
        before.is_some_and(u8::is_ascii_digit) && after.is_some_and(u8::is_ascii_digit)
    });

    well_placed.then(|| Cow::Owned(raw.replace('_', "")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, description: &str, price: &str, quantity: &str) -> ProductForm {
        ProductForm::new(name, description, price, quantity)
    }

    fn messages(form: &ProductForm) -> Vec<String> {
        validate_and_build(form).unwrap_err().messages()
    }

    #[test]
    fn valid_form_builds_typed_fields() {
        let fields = validate_and_build(&form("Widget", "", "19.90", "10")).unwrap();
        assert_eq!(fields.name, "Widget");
        assert_eq!(fields.description, "");
        assert_eq!(fields.price, Decimal::new(1990, 2));
        assert_eq!(fields.price.to_string(), "19.90");
        assert_eq!(fields.quantity, 10);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let fields = validate_and_build(&form("  Widget \n", "\t a thing ", " 5 ", " 2 ")).unwrap();
        assert_eq!(fields.name, "Widget");
        assert_eq!(fields.description, "a thing");
        assert_eq!(fields.price, Decimal::from(5));
        assert_eq!(fields.quantity, 2);
    }

    #[test]
    fn empty_name_is_the_only_error() {
        assert_eq!(messages(&form("", "", "5", "5")), vec!["Name is required."]);
        assert_eq!(messages(&form("   ", "", "5", "5")), vec!["Name is required."]);
    }

    #[test]
    fn price_errors() {
        assert_eq!(messages(&form("Widget", "", "-5", "1")), vec!["Price must be >= 0."]);
        assert_eq!(messages(&form("Widget", "", "abc", "1")), vec!["Invalid price."]);
        assert_eq!(messages(&form("Widget", "", "", "1")), vec!["Invalid price."]);
        assert_eq!(messages(&form("Widget", "", "nan", "1")), vec!["Invalid price."]);
        assert_eq!(
            messages(&form("Widget", "", "100000000", "1")),
            vec!["Price must be less than 100000000."]
        );
    }

    #[test]
    fn price_is_rounded_to_cents() {
        let fields = validate_and_build(&form("Widget", "", "0.125", "1")).unwrap();
        assert_eq!(fields.price.to_string(), "0.13");

        let fields = validate_and_build(&form("Widget", "", "1e2", "1")).unwrap();
        assert_eq!(fields.price, Decimal::from(100));

        let fields = validate_and_build(&form("Widget", "", "99999999.99", "1")).unwrap();
        assert_eq!(fields.price.to_string(), "99999999.99");

        assert_eq!(
            messages(&form("Widget", "", "99999999.995", "1")),
            vec!["Price must be less than 100000000."]
        );
    }

    #[test]
    fn negative_zero_price_is_stored_as_zero() {
        let fields = validate_and_build(&form("Widget", "", "-0", "1")).unwrap();
        assert_eq!(fields.price, Decimal::ZERO);
        assert!(!fields.price.is_sign_negative());
        assert_eq!(fields.price.to_string(), "0.00");
    }

    #[test]
    fn quantity_errors() {
        assert_eq!(messages(&form("Widget", "", "1", "-1")), vec!["Quantity must be >= 0."]);
        assert_eq!(messages(&form("Widget", "", "1", "many")), vec!["Invalid quantity."]);
        assert_eq!(messages(&form("Widget", "", "1", "inf")), vec!["Invalid quantity."]);
        assert_eq!(messages(&form("Widget", "", "1", "NaN")), vec!["Invalid quantity."]);
        assert_eq!(messages(&form("Widget", "", "1", "1e12")), vec!["Invalid quantity."]);
    }

    #[test]
    fn quantity_is_truncated_toward_zero() {
        assert_eq!(validate_and_build(&form("W", "", "1", "3.0")).unwrap().quantity, 3);
        assert_eq!(validate_and_build(&form("W", "", "1", "7.9")).unwrap().quantity, 7);
        assert_eq!(validate_and_build(&form("W", "", "1", "-0.5")).unwrap().quantity, 0);
        assert_eq!(validate_and_build(&form("W", "", "1", "2e1")).unwrap().quantity, 20);
    }

    #[test]
    fn all_errors_are_reported_in_field_order() {
        let rejected = validate_and_build(&form(" ", "", "-1", "x")).unwrap_err();
        assert_eq!(
            rejected.messages(),
            vec!["Name is required.", "Price must be >= 0.", "Invalid quantity."]
        );
        assert_eq!(
            rejected.issues.iter().map(|i| i.field()).collect::<Vec<_>>(),
            vec!["name", "price", "quantity"]
        );
    }

    #[test]
    fn length_limits_count_characters() {
        let name = "é".repeat(NAME_MAX_CHARS);
        assert!(validate_and_build(&form(&name, "", "1", "1")).is_ok());

        let long_name = "x".repeat(NAME_MAX_CHARS + 1);
        let long_description = "y".repeat(DESCRIPTION_MAX_CHARS + 1);
        assert_eq!(
            messages(&form(&long_name, &long_description, "1", "1")),
            vec![
                "Name must be at most 100 characters.",
                "Description must be at most 255 characters."
            ]
        );
    }

    #[test]
    fn rejection_echoes_trimmed_input() {
        let rejected = validate_and_build(&form("  ", " notes ", " abc ", " 4 ")).unwrap_err();
        assert_eq!(rejected.input, form("", "notes", "abc", "4"));
    }

    #[test]
    fn out_of_range_exponents_fall_back_to_float_parsing() {
        let fields = validate_and_build(&form("Widget", "", "1e-30", "1")).unwrap();
        assert_eq!(fields.price.to_string(), "0.00");

        assert_eq!(
            messages(&form("Widget", "", "1e40", "1")),
            vec!["Price must be less than 100000000."]
        );
        assert_eq!(messages(&form("Widget", "", "-1e-30", "1")), vec!["Price must be >= 0."]);
        let fields = validate_and_build(&form("Widget", "", "1e-9999", "1")).unwrap();
        assert_eq!(fields.price, Decimal::ZERO);
    }

    #[test]
    fn small_negative_price_is_rejected() {
        assert_eq!(messages(&form("Widget", "", "-0.001", "1")), vec!["Price must be >= 0."]);
    }

    #[test]
    fn digit_group_underscores_are_accepted() {
        let fields = validate_and_build(&form("Widget", "", "1_000.5", "1_0")).unwrap();
        assert_eq!(fields.price.to_string(), "1000.50");
        assert_eq!(fields.quantity, 10);

        for bad in ["_1", "1_", "1__0", "1_.5"] {
            assert_eq!(messages(&form("Widget", "", bad, "1")), vec!["Invalid price."], "{bad}");
            assert_eq!(messages(&form("Widget", "", "1", bad)), vec!["Invalid quantity."], "{bad}");
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: any in-range input builds fields equal to the input values.
            #[test]
            fn valid_input_round_trips_into_fields(
                name in "[A-Za-z0-9][A-Za-z0-9 ]{0,98}[A-Za-z0-9]",
                description in "[a-z ]{0,40}",
                cents in 0i64..10_000_000_000,
                quantity in 0i32..=i32::MAX,
            ) {
                let price = Decimal::new(cents, 2);
                let form = ProductForm::new(&name, &description, price.to_string(), quantity.to_string());

                let fields = validate_and_build(&form).unwrap();

                prop_assert_eq!(fields.name, name);
                prop_assert_eq!(fields.description, description.trim());
                prop_assert_eq!(fields.price, price);
                prop_assert_eq!(fields.quantity, quantity);
            }

            /// Property: a blank name always fails, and "Name is required." comes first.
            #[test]
            fn blank_name_always_rejected(
                name in "[ \t\n]{0,10}",
                price in "-?[0-9]{1,4}",
                quantity in "-?[0-9]{1,4}",
            ) {
                let rejected = validate_and_build(&ProductForm::new(name, "", price, quantity)).unwrap_err();
                prop_assert_eq!(rejected.issues[0], ValidationIssue::NameRequired);
            }

            /// Property: "N.0" quantities are accepted and stored as N.
            #[test]
            fn whole_float_quantity_is_integer(quantity in 0i32..1_000_000) {
                let form = ProductForm::new("Widget", "", "1", format!("{quantity}.0"));
                prop_assert_eq!(validate_and_build(&form).unwrap().quantity, quantity);
            }
        }
    }
}
