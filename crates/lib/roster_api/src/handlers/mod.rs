//! Request handlers.

pub mod account;
pub mod employees;
pub mod health;
pub mod roles;
