//! Per-request authorization decisions.
//!
//! Every request carries an [`AuthContext`] derived from its own credential,
//! and each protected operation states a [`Requirement`]. Nothing is cached
//! between requests.

use crate::models::auth::TokenClaims;

/// Authentication state of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthContext {
    /// No credential, or one that failed verification or has expired.
    #[default]
    Anonymous,
    Authenticated(TokenClaims),
}

impl AuthContext {
    pub fn claims(&self) -> Option<&TokenClaims> {
        match self {
            AuthContext::Anonymous => None,
            AuthContext::Authenticated(claims) => Some(claims),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::Authenticated(_))
    }
}

impl From<Option<TokenClaims>> for AuthContext {
    fn from(claims: Option<TokenClaims>) -> Self {
        claims.map_or(AuthContext::Anonymous, AuthContext::Authenticated)
    }
}

/// What an operation demands of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Any authenticated identity.
    Authenticated,
    /// An identity whose role claim equals this name exactly (case-sensitive).
    Role(String),
}

impl Requirement {
    pub fn role(name: impl Into<String>) -> Self {
        Requirement::Role(name.into())
    }

    /// Decide whether `context` satisfies this requirement.
    pub fn check<'a>(&self, context: &'a AuthContext) -> Result<&'a TokenClaims, AccessDenied> {
        let claims = context.claims().ok_or(AccessDenied::Unauthenticated)?;
        match self {
            Requirement::Authenticated => Ok(claims),
            Requirement::Role(role) if claims.role == *role => Ok(claims),
            Requirement::Role(_) => Err(AccessDenied::Forbidden),
        }
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// No usable credential.
    Unauthenticated,
    /// Valid credential, wrong role.
    Forbidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: &str) -> TokenClaims {
        TokenClaims {
            sub: "someone".into(),
            role: role.into(),
            jti: "0190".into(),
            iss: "iss".into(),
            aud: "aud".into(),
            iat: 0,
            exp: 1,
        }
    }

    #[test]
    fn anonymous_is_unauthenticated_for_every_requirement() {
        let ctx = AuthContext::Anonymous;
        assert_eq!(
            Err(AccessDenied::Unauthenticated),
            Requirement::Authenticated.check(&ctx)
        );
        assert_eq!(
            Err(AccessDenied::Unauthenticated),
            Requirement::role("Admin").check(&ctx)
        );
    }

    #[test]
    fn any_role_satisfies_authenticated() {
        let ctx = AuthContext::Authenticated(claims("Staff"));
        assert_eq!("Staff", Requirement::Authenticated.check(&ctx).unwrap().role);
    }

    #[test]
    fn role_match_is_exact() {
        let admin = AuthContext::Authenticated(claims("Admin"));
        assert!(Requirement::role("Admin").check(&admin).is_ok());

        let lower = AuthContext::Authenticated(claims("admin"));
        assert_eq!(
            Err(AccessDenied::Forbidden),
            Requirement::role("Admin").check(&lower)
        );

        let staff = AuthContext::Authenticated(claims("Staff"));
        assert_eq!(
            Err(AccessDenied::Forbidden),
            Requirement::role("Admin").check(&staff)
        );
    }

    #[test]
    fn context_from_verification_result() {
        assert_eq!(AuthContext::Anonymous, AuthContext::from(None));
        assert!(AuthContext::from(Some(claims("Admin"))).is_authenticated());
    }
}
