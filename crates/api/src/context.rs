use stockroom_auth::{JwtClaims, Principal, PrincipalId, Role};

/// Principal context for a request (authenticated identity + roles).
///
/// Inserted by the auth middleware; every protected handler can rely on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: PrincipalId,
    roles: Vec<Role>,
}

impl PrincipalContext {
    pub fn new(principal_id: PrincipalId, roles: Vec<Role>) -> Self {
        Self { principal_id, roles }
    }

    pub fn from_claims(claims: &JwtClaims) -> Self {
        Self::new(claims.sub, claims.roles.clone())
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.principal_id, self.roles.clone())
    }
}
