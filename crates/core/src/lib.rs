//! Domain layer for the RMU Exchange backend.
//!
//! This crate has no internal dependencies and no knowledge of HTTP or the
//! database. It defines the shared id/timestamp types, the domain error
//! taxonomy, the item/exchange/report lifecycle rules, and the item-deletion
//! workflow together with the capability contract it runs against.

pub mod chat;
pub mod deletion;
pub mod error;
pub mod item;
pub mod media;
pub mod pagination;
pub mod report;
pub mod roles;
pub mod status;
pub mod types;
