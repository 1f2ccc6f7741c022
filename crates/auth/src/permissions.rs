use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque strings (e.g. "products.read"). The wildcard `"*"`
/// grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const WILDCARD: Permission = Permission(Cow::Borrowed("*"));
    /// View the product list, edit forms and delete confirmations.
    pub const PRODUCTS_READ: Permission = Permission(Cow::Borrowed("products.read"));
    /// Create, edit and delete products.
    pub const PRODUCTS_WRITE: Permission = Permission(Cow::Borrowed("products.write"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }

    /// Whether holding `self` satisfies a requirement for `required`.
    pub fn grants(&self, required: &Permission) -> bool {
        self.is_wildcard() || self == required
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
