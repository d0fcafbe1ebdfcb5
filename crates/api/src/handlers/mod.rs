//! HTTP handlers, grouped per resource.

pub mod admin;
pub mod exchanges;
pub mod health;
pub mod items;
pub mod messages;
pub mod notifications;
pub mod reports;
