//! Bearer-token verification.
//!
//! Token *issuance* belongs to the external identity service; this backend
//! only validates incoming access tokens.

pub mod jwt;
