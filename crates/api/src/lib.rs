//! HTTP surface of the RMU Exchange backend.

pub mod auth;
pub mod config;
pub mod deletion;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notifications;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
