//! In-process platform event bus.
//!
//! Handlers publish [`PlatformEvent`]s after successful mutations; the
//! notification writer in the API crate subscribes and fans events out to
//! per-user notification rows.

pub mod bus;

pub use bus::{event_types, EventBus, PlatformEvent};
