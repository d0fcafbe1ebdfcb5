//! Role name constants embedded in JWT claims and `users.role`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";
