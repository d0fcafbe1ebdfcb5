//! Event-to-notification fan-out.

pub mod writer;

pub use writer::NotificationWriter;
