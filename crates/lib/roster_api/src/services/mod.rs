//! Services called by the handlers.

pub mod auth;
pub mod cookies;
pub mod employees;
