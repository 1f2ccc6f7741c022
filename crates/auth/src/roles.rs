use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Role identifier used for RBAC.
///
/// Roles travel as opaque strings in tokens; [`Role::permissions`] is the policy
/// mapping them to permissions. Unknown roles grant nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn permissions(&self) -> Vec<Permission> {
        match self.as_str() {
            "admin" => vec![Permission::WILDCARD],
            "staff" => vec![Permission::PRODUCTS_READ, Permission::PRODUCTS_WRITE],
            "viewer" => vec![Permission::PRODUCTS_READ],
            _ => Vec::new(),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
