//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API response models
//! (which have `#[serde(rename)]` for camelCase etc.).

use serde::{Deserialize, Serialize};

/// A verified identity: who logged in and which role they act under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub role: String,
}

/// JWT claims embedded in identity tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — username (standard JWT `sub` claim).
    pub sub: String,
    /// Role the subject acts under (e.g. `"Admin"`).
    pub role: String,
    /// Unique token id, used for tracing a token through logs.
    pub jti: String,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

impl TokenClaims {
    /// The identity carried by these claims.
    pub fn identity(&self) -> Identity {
        Identity {
            username: self.sub.clone(),
            role: self.role.clone(),
        }
    }
}
