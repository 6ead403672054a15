//! # roster_core
//!
//! Core domain logic for Roster: employee and role persistence, identity
//! tokens, credential verification and the authorization gate.

pub mod auth;
pub mod db;
pub mod employees;
pub mod migrate;
pub mod models;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
