use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{PrincipalId, Principal, Role};

/// JWT claims model (transport-agnostic).
///
/// The minimal set of claims the app expects once a token has been decoded and
/// its signature verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / principal identifier.
    pub sub: PrincipalId,

    /// RBAC roles granted to the subject.
    pub roles: Vec<Role>,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl JwtClaims {
    pub fn principal(&self) -> Principal {
        Principal::new(self.sub, self.roles.clone())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate JWT claims against `now`.
///
/// Note: this validates the *claims* only; signature checks live in [`crate::jwt`].
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn claims(issued_min: i64, expires_min: i64) -> JwtClaims {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        JwtClaims {
            sub: PrincipalId::new(),
            roles: vec![Role::new("staff")],
            issued_at: base + Duration::minutes(issued_min),
            expires_at: base + Duration::minutes(expires_min),
        }
    }

    fn at(min: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(min)
    }

    #[test]
    fn accepts_inside_window() {
        assert_eq!(validate_claims(&claims(0, 10), at(5)), Ok(()));
        assert_eq!(validate_claims(&claims(0, 10), at(0)), Ok(()));
    }

    #[test]
    fn rejects_outside_window() {
        assert_eq!(validate_claims(&claims(0, 10), at(10)), Err(TokenValidationError::Expired));
        assert_eq!(validate_claims(&claims(5, 10), at(1)), Err(TokenValidationError::NotYetValid));
        assert_eq!(
            validate_claims(&claims(10, 10), at(10)),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn principal_carries_subject_and_roles() {
        let c = claims(0, 10);
        let p = c.principal();
        assert_eq!(p.principal_id, c.sub);
        assert_eq!(p.roles, vec![Role::new("staff")]);
    }
}
