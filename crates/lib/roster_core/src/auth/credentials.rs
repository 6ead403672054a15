//! Credential verification.
//!
//! The login flow only sees the [`CredentialVerifier`] trait, so a database
//! or directory backed store can replace [`StaticCredentials`] without
//! touching it.

use async_trait::async_trait;

use super::AuthError;
use super::password::{hash_password, verify_password};
use crate::models::auth::Identity;

/// Username of the development account.
pub const DEV_USERNAME: &str = "admin";
/// Password of the development account.
pub const DEV_PASSWORD: &str = "password";
/// Role granted to administrators.
pub const ADMIN_ROLE: &str = "Admin";

/// Checks a username/password pair.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Returns the identity for a matching pair, `None` for a mismatch.
    async fn verify(&self, username: &str, password: &str) -> Result<Option<Identity>, AuthError>;
}

/// A configured account: username, bcrypt hash and role.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

/// A fixed list of accounts held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    accounts: Vec<Account>,
}

impl StaticCredentials {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// The development account `admin` / `password` acting as `Admin`.
    pub fn development() -> Result<Self, AuthError> {
        Ok(Self::new(vec![Account {
            username: DEV_USERNAME.into(),
            password_hash: hash_password(DEV_PASSWORD)?,
            role: ADMIN_ROLE.into(),
        }]))
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.push(account);
        self
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn verify(&self, username: &str, password: &str) -> Result<Option<Identity>, AuthError> {
        let Some(account) = self.accounts.iter().find(|a| a.username == username) else {
            return Ok(None);
        };
        if !verify_password(password, &account.password_hash)? {
            return Ok(None);
        }
        Ok(Some(Identity {
            username: account.username.clone(),
            role: account.role.clone(),
        }))
    }
}
