//! Domain models shared by the API and the CLI.

pub mod auth;
pub mod employee;
