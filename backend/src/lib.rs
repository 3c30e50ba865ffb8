//! Eventmap backend library
//!
//! Accounts, cookie sessions, and owner-guarded events on a map. Exposed
//! as a library so integration tests can build the router directly.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod search;
pub mod services;
pub mod state;
