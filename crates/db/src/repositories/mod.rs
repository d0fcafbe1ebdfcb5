//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod exchange_repo;
pub mod item_repo;
pub mod message_repo;
pub mod notification_repo;
pub mod report_repo;
pub mod user_repo;

pub use exchange_repo::ExchangeRepo;
pub use item_repo::ItemRepo;
pub use message_repo::MessageRepo;
pub use notification_repo::NotificationRepo;
pub use report_repo::ReportRepo;
pub use user_repo::UserRepo;
